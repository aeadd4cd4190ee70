//! Puzzle problem definition: encode, search, decode, validate

use super::board::{load_board_from_file, Board};
use super::encoder::{EncodingStatistics, SudokuEncoder};
use super::solution::{SolutionMetadata, SudokuSolution};
use super::validator::SolutionValidator;
use crate::config::Settings;
use crate::dlx::{DlxSolver, EnumerationPolicy, SearchOptions};
use anyhow::{Context, Result};
use std::time::Instant;
use thiserror::Error;

/// The search deadline passed before any solution was found.
///
/// Distinguishes a puzzle that ran out of time from one with no solution,
/// which is reported as an empty list instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline reached after {calls} search call(s) without a solution")]
pub struct DeadlineExceeded {
    pub calls: u64,
}

/// A number-place puzzle solved through the exact cover core
pub struct SudokuProblem {
    settings: Settings,
    search: SearchOptions,
    puzzle: Board,
    encoder: SudokuEncoder,
    validator: SolutionValidator,
}

impl SudokuProblem {
    /// Create a problem from settings, loading the puzzle file
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle =
            load_board_from_file(&settings.input.puzzle_file).context("Failed to load puzzle file")?;
        Ok(Self::with_board(settings, puzzle))
    }

    /// Create a problem with an explicit board
    pub fn with_board(settings: Settings, puzzle: Board) -> Self {
        let encoder = SudokuEncoder::new(&settings.encoding);
        let search = settings.solver.search_options();
        Self {
            settings,
            search,
            puzzle,
            encoder,
            validator: SolutionValidator::new(),
        }
    }

    /// Replace the search options derived from the settings
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search = options;
        self
    }

    /// Solve under the configured policy and return every valid solution found.
    ///
    /// Fails with [`DeadlineExceeded`] when the deadline passes before the
    /// first solution. A deadline hit later returns the partial list.
    pub fn solve(&self) -> Result<Vec<SudokuSolution>> {
        self.solve_with(self.search)
    }

    fn solve_with(&self, options: SearchOptions) -> Result<Vec<SudokuSolution>> {
        let start_time = Instant::now();

        let encoded = self
            .encoder
            .encode(&self.puzzle)
            .context("Failed to encode puzzle")?;
        let mut solver =
            DlxSolver::new(&encoded.relation).context("Failed to build linked structure")?;
        let result = solver.solve_with(options);
        let solve_time = start_time.elapsed();

        if result.timed_out() {
            if result.is_empty() {
                return Err(DeadlineExceeded {
                    calls: result.stats().calls,
                }
                .into());
            }
            log::warn!(
                "deadline reached, keeping {} partial solution(s)",
                result.solution_count()
            );
        }

        log::info!(
            "puzzle with {} clues: {} cover(s) in {:.3}s",
            self.puzzle.filled_count(),
            result.solution_count(),
            solve_time.as_secs_f64()
        );

        let unique = result.solution_count() == 1 && !result.stopped_early();
        let mut solutions = Vec::with_capacity(result.solution_count());
        for (i, cover) in result.solutions().iter().enumerate() {
            let board = self
                .encoder
                .decode(&encoded, cover)
                .with_context(|| format!("Failed to decode solution {}", i + 1))?;

            let validation = self.validator.validate(&self.puzzle, &board);
            if !validation.is_valid {
                log::warn!(
                    "solution {} failed validation: {}",
                    i + 1,
                    validation.error_message.unwrap_or_default()
                );
                continue;
            }

            let placements = cover
                .rows()
                .iter()
                .filter_map(|&row| encoded.placements.get(row).copied())
                .collect();
            let metadata = SolutionMetadata::new(
                &board,
                i + 1,
                self.puzzle.filled_count(),
                unique,
                result.stats().clone(),
            );
            solutions.push(SudokuSolution::new(
                self.puzzle.clone(),
                board,
                placements,
                solve_time,
                metadata,
            ));
        }

        Ok(solutions)
    }

    /// Solve and keep only the first solution
    pub fn solve_first(&self) -> Result<Option<SudokuSolution>> {
        let options = SearchOptions {
            policy: EnumerationPolicy::FirstSolution,
            ..self.search
        };
        Ok(self.solve_with(options)?.into_iter().next())
    }

    /// Size of the relation this puzzle encodes to
    pub fn encoding_statistics(&self) -> Result<EncodingStatistics> {
        Ok(self.encoder.encode(&self.puzzle)?.statistics)
    }

    /// Get the puzzle
    pub fn puzzle(&self) -> &Board {
        &self.puzzle
    }

    /// Get the problem settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchMode;
    use crate::sudoku::board::examples;
    use std::time::Duration;
    use tempfile::tempdir;

    fn settings(mode: SearchMode) -> Settings {
        let mut settings = Settings::default();
        settings.solver.mode = mode;
        settings
    }

    #[test]
    fn test_classic_puzzle() {
        let puzzle = Board::parse(examples::CLASSIC).unwrap();
        let problem = SudokuProblem::with_board(settings(SearchMode::First), puzzle.clone());
        let solution = problem.solve_first().unwrap().unwrap();

        assert_eq!(solution.board.to_line(), examples::CLASSIC_SOLUTION);
        assert!(SolutionValidator::new().validate(&puzzle, &solution.board).is_valid);
        assert_eq!(solution.placements.len(), 81);
        assert_eq!(solution.deductions().count(), 81 - 32);
    }

    #[test]
    fn test_unpruned_encoding_finds_same_solution() {
        let mut settings = settings(SearchMode::Exhaustive);
        settings.encoding.prune_given_conflicts = false;
        let puzzle = Board::parse(examples::HARD).unwrap();
        let solutions = SudokuProblem::with_board(settings, puzzle).solve().unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].board.to_line(), examples::HARD_SOLUTION);
        assert!(solutions[0].metadata.unique);
    }

    #[test]
    fn test_sparse_puzzle() {
        let puzzle = Board::parse(examples::SPARSE).unwrap();
        let solutions = SudokuProblem::with_board(settings(SearchMode::First), puzzle)
            .solve()
            .unwrap();
        assert_eq!(solutions[0].board.to_line(), examples::SPARSE_SOLUTION);
    }

    #[test]
    fn test_empty_board_respects_limit() {
        let mut settings = settings(SearchMode::Limit);
        settings.solver.max_solutions = 3;
        let solutions = SudokuProblem::with_board(settings, Board::empty()).solve().unwrap();

        assert_eq!(solutions.len(), 3);
        assert!(solutions.iter().all(|s| !s.metadata.unique));
        assert_ne!(solutions[0].board, solutions[1].board);
        assert_eq!(solutions[2].metadata.index, 3);
    }

    #[test]
    fn test_contradictory_clues_have_no_solution() {
        let mut line = examples::CLASSIC.to_string();
        // a second 3 in row 0
        line.replace_range(0..1, "3");
        let puzzle = Board::parse(&line).unwrap();
        let solutions = SudokuProblem::with_board(settings(SearchMode::Exhaustive), puzzle)
            .solve()
            .unwrap();
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_deadline_is_not_reported_as_unsolvable() {
        let puzzle = Board::parse(examples::HARD).unwrap();
        let problem = SudokuProblem::with_board(settings(SearchMode::Exhaustive), puzzle)
            .with_search_options(
                SearchOptions::new(EnumerationPolicy::Exhaustive).with_timeout(Duration::ZERO),
            );

        let error = problem.solve().unwrap_err();
        assert_eq!(
            error.downcast_ref::<DeadlineExceeded>(),
            Some(&DeadlineExceeded { calls: 0 })
        );

        let error = problem.solve_first().unwrap_err();
        assert!(error.is::<DeadlineExceeded>());
    }

    #[test]
    fn test_load_from_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("puzzle.txt");
        std::fs::write(&path, examples::CLASSIC).unwrap();

        let mut settings = settings(SearchMode::First);
        settings.input.puzzle_file = path;
        let problem = SudokuProblem::new(settings).unwrap();
        assert_eq!(problem.puzzle().filled_count(), 32);

        let stats = problem.encoding_statistics().unwrap();
        assert_eq!(stats.items, 324);
        assert_eq!(stats.clues, 32);
    }
}
