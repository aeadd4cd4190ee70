//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::dlx::{CoverSolution, DancingMatrix, SearchResult};
use crate::sudoku::{Board, SudokuSolution};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Reconstruct each chosen row as a 0/1 vector by walking its ring in the matrix
    pub fn format_cover_rows(matrix: &DancingMatrix, solution: &CoverSolution) -> String {
        let mut output = String::new();
        for &row in solution.rows() {
            let mut bits = vec![0u8; matrix.width()];
            for column in matrix.row_columns(row).unwrap_or_default() {
                bits[column] = 1;
            }
            output.push_str(&format!("row {:>4}: {}\n", row, bits.iter().join(" ")));
        }
        output
    }

    /// Format every cover of a result
    pub fn format_cover_result(matrix: &DancingMatrix, result: &SearchResult) -> String {
        let mut output = String::new();
        for (i, solution) in result.solutions().iter().enumerate() {
            output.push_str(&format!("=== Cover {} ===\n", i + 1));
            output.push_str(&Self::format_cover_rows(matrix, solution));
            output.push('\n');
        }
        output
    }

    /// One line per cover listing its rows in ascending order
    pub fn format_cover_summary(result: &SearchResult) -> String {
        let mut output = String::new();

        output.push_str("Covers Summary:\n");
        output.push_str("#     | Size | Rows\n");
        output.push_str("------|------|------------------------\n");
        for (i, solution) in result.solutions().iter().enumerate() {
            output.push_str(&format!(
                "{:5} | {:4} | {}\n",
                i + 1,
                solution.len(),
                solution.sorted_rows().iter().join(", ")
            ));
        }

        output
    }

    /// Format a single puzzle solution for console output
    pub fn format_sudoku_solution(solution: &SudokuSolution, show_puzzle: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!("Clues: {}\n", solution.metadata.clue_count));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!("Search Calls: {}\n", solution.metadata.search.calls));
        if solution.metadata.unique {
            output.push_str("Unique: Yes\n");
        }
        output.push('\n');

        if show_puzzle {
            output.push_str("Puzzle:\n");
            output.push_str(&solution.puzzle.to_string());
            output.push('\n');
        }
        output.push_str("Solution:\n");
        output.push_str(&solution.board.to_string());

        output
    }

    /// Format multiple puzzle solutions as a summary table
    pub fn format_sudoku_summary(solutions: &[SudokuSolution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("ID       | Clues | Time(ms) | Calls\n");
        output.push_str("---------|-------|----------|----------\n");

        for solution in solutions {
            output.push_str(&format!(
                "{:8} | {:5} | {:8} | {}\n",
                &solution.metadata.id[..8.min(solution.metadata.id.len())],
                solution.metadata.clue_count,
                solution.solve_time.as_millis(),
                solution.metadata.search.calls
            ));
        }

        output
    }

    /// Format a board on a single line
    pub fn format_board_compact(board: &Board) -> String {
        board.to_line().replace('0', ".")
    }

    /// Format a board with row and column coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..9 {
            output.push_str(&format!("{:2}", col));
        }
        output.push('\n');

        for row in 0..9 {
            output.push_str(&format!("{:2} ", row));
            for col in 0..9 {
                match board.get(row, col) {
                    Some(digit) => output.push_str(&format!("{:2}", digit)),
                    None => output.push_str(" ·"),
                }
            }
            output.push('\n');
        }

        output
    }

    /// Save the covers of a relation search based on output format
    pub fn save_cover_results<P: AsRef<Path>>(
        matrix: &DancingMatrix,
        result: &SearchResult,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let content = Self::format_cover_summary(result);
                std::fs::write(output_dir.join("covers.txt"), content)?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(result.solutions())?;
                std::fs::write(output_dir.join("covers.json"), json)?;
                let stats_json = serde_json::to_string_pretty(result.stats())?;
                std::fs::write(output_dir.join("search_stats.json"), stats_json)?;
            }
            OutputFormat::Visual => {
                let content = Self::format_cover_result(matrix, result);
                std::fs::write(output_dir.join("covers_visual.txt"), content)?;
            }
        }

        Ok(())
    }

    /// Save puzzle solutions to files based on output format
    pub fn save_sudoku_solutions<P: AsRef<Path>>(
        solutions: &[SudokuSolution],
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.txt", i + 1));
                    std::fs::write(filepath, format!("{}\n", solution.board.to_line()))?;
                }
            }
            OutputFormat::Json => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.json", i + 1));
                    solution.save_to_file(filepath)?;
                }

                let summary_path = output_dir.join("solutions_summary.json");
                let summaries: Vec<_> = solutions.iter().map(|s| s.summary()).collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(summary_path, summary_json)?;
            }
            OutputFormat::Visual => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}_visual.txt", i + 1));
                    let content = format!(
                        "{}\nFilled cells:\n{}",
                        Self::format_sudoku_solution(solution, true),
                        Self::format_board_with_coords(&solution.board)
                    );
                    std::fs::write(filepath, content)?;
                }
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
