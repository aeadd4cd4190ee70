//! Exact cover solver built on dancing links
//!
//! This library finds every way to pick rows of a 0/1 incidence relation so
//! that each column is covered exactly once, using Knuth's Algorithm X over a
//! circular doubly linked structure. A Sudoku adapter on top of it shows the
//! solver working on a real encoding.

pub mod config;
pub mod dlx;
pub mod relation;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use dlx::{CoverSolution, DlxError, DlxSolver, EnumerationPolicy, SearchResult};
pub use relation::Relation;
pub use sudoku::{SudokuProblem, SudokuSolution};

use anyhow::Result;

/// Build a solver for `relation` and run one search under `policy`
pub fn solve_exact_cover(
    relation: &Relation,
    policy: EnumerationPolicy,
) -> Result<SearchResult, DlxError> {
    Ok(DlxSolver::new(relation)?.solve(policy))
}

/// Main entry point for solving the puzzle named in the settings
pub fn solve_sudoku(settings: Settings) -> Result<Vec<SudokuSolution>> {
    let problem = SudokuProblem::new(settings)?;
    problem.solve()
}
