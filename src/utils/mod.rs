//! Output helpers shared by the CLI and demos

pub mod display;

pub use display::{Color, ColorOutput, SolutionFormatter};
