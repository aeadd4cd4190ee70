//! Dancing links: the exact cover core
//!
//! A [`Relation`](crate::relation::Relation) is turned into a
//! [`DancingMatrix`] whose rows and columns are circular doubly linked
//! rings over an index arena. [`DlxSolver`] runs Knuth's Algorithm X on it,
//! covering and uncovering columns while it recurses, and hands back a
//! [`SearchResult`] holding the chosen row indices of every exact cover.

pub mod error;
mod heuristic;
pub mod matrix;
mod node;
pub mod result;
pub mod search;

pub use error::DlxError;
pub use matrix::{ActiveColumns, DancingMatrix};
pub use result::{CoverSolution, EnumerationPolicy, SearchOptions, SearchResult, SearchStats};
pub use search::DlxSolver;
