//! Solving many puzzles at once, one linked structure per puzzle

use super::board::Board;
use super::problem::SudokuProblem;
use super::solution::SudokuSolution;
use crate::config::Settings;
use anyhow::Result;
use rayon::prelude::*;

/// Outcome for one puzzle of a batch
#[derive(Debug)]
pub struct BatchEntry {
    /// Position of the puzzle in the input
    pub index: usize,
    pub puzzle: Board,
    pub solution: Result<Option<SudokuSolution>>,
}

/// Solve each board independently on the rayon thread pool.
///
/// Only the first solution of each puzzle is kept. Results come back in
/// input order.
pub fn solve_batch(settings: &Settings, boards: &[Board]) -> Vec<BatchEntry> {
    boards
        .par_iter()
        .enumerate()
        .map(|(index, board)| {
            let problem = SudokuProblem::with_board(settings.clone(), board.clone());
            BatchEntry {
                index,
                puzzle: board.clone(),
                solution: problem.solve_first(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::examples;

    #[test]
    fn test_batch_matches_sequential() {
        let settings = Settings::default();
        let boards: Vec<Board> = [examples::CLASSIC, examples::HARD, examples::SPARSE]
            .iter()
            .map(|line| Board::parse(line).unwrap())
            .collect();

        let entries = solve_batch(&settings, &boards);
        assert_eq!(entries.len(), 3);

        let expected = [
            examples::CLASSIC_SOLUTION,
            examples::HARD_SOLUTION,
            examples::SPARSE_SOLUTION,
        ];
        for (entry, expected) in entries.iter().zip(expected) {
            let solution = entry.solution.as_ref().unwrap().as_ref().unwrap();
            assert_eq!(solution.board.to_line(), expected);

            let sequential = SudokuProblem::with_board(settings.clone(), entry.puzzle.clone())
                .solve_first()
                .unwrap()
                .unwrap();
            assert_eq!(sequential.board, solution.board);
        }
        assert_eq!(entries[2].index, 2);
    }

    #[test]
    fn test_batch_reports_unsolvable() {
        let mut line = examples::CLASSIC.to_string();
        line.replace_range(0..1, "3");
        let boards = vec![Board::parse(&line).unwrap()];

        let entries = solve_batch(&Settings::default(), &boards);
        assert!(entries[0].solution.as_ref().unwrap().is_none());
    }
}
