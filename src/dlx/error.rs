//! Errors raised by the exact cover core

use thiserror::Error;

/// Failure to accept an incidence relation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DlxError {
    /// The relation is not a non-empty rectangle of 0/1 values
    #[error("invalid relation shape: {reason}")]
    InvalidShape { reason: String },
}

impl DlxError {
    pub(crate) fn invalid_shape(reason: impl Into<String>) -> Self {
        DlxError::InvalidShape {
            reason: reason.into(),
        }
    }
}
