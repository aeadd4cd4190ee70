//! Number-place puzzles as exact cover problems

pub mod batch;
pub mod board;
pub mod encoder;
pub mod problem;
pub mod solution;
pub mod validator;

pub use batch::{solve_batch, BatchEntry};
pub use board::{load_board_from_file, load_boards_from_file, Board};
pub use encoder::{EncodedPuzzle, EncodingStatistics, Placement, SudokuEncoder};
pub use problem::{DeadlineExceeded, SudokuProblem};
pub use solution::SudokuSolution;
pub use validator::{SolutionValidator, ValidationResult};
