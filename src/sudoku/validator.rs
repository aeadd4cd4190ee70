//! Checking filled boards against the clues and the placement rules

use super::board::{Board, BOX_SIZE, SIZE};
use itertools::Itertools;
use std::fmt;

/// Validates solved boards against their puzzle
#[derive(Debug, Clone, Default)]
pub struct SolutionValidator;

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
    pub error_message: Option<String>,
}

/// Which rule a violation breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    BlankCell,
    ClueChanged,
    DuplicateInRow,
    DuplicateInColumn,
    DuplicateInBox,
}

/// One broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub kind: ViolationKind,
    /// Cell for cell rules, house index (row, column or box) in `.0` for house rules
    pub position: (usize, usize),
    pub digit: Option<u8>,
    pub description: String,
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate that `candidate` completes `puzzle`
    pub fn validate(&self, puzzle: &Board, candidate: &Board) -> ValidationResult {
        let mut violations = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                match (puzzle.get(row, col), candidate.get(row, col)) {
                    (_, None) => violations.push(RuleViolation {
                        kind: ViolationKind::BlankCell,
                        position: (row, col),
                        digit: None,
                        description: format!("Cell ({}, {}) is blank", row, col),
                    }),
                    (Some(clue), Some(digit)) if clue != digit => violations.push(RuleViolation {
                        kind: ViolationKind::ClueChanged,
                        position: (row, col),
                        digit: Some(digit),
                        description: format!(
                            "Cell ({}, {}) holds {} but the clue is {}",
                            row, col, digit, clue
                        ),
                    }),
                    _ => {}
                }
            }
        }

        for house in 0..SIZE {
            let row_cells = (0..SIZE).map(|col| (house, col));
            Self::check_house(candidate, row_cells, house, ViolationKind::DuplicateInRow, &mut violations);

            let col_cells = (0..SIZE).map(|row| (row, house));
            Self::check_house(candidate, col_cells, house, ViolationKind::DuplicateInColumn, &mut violations);

            let (box_row, box_col) = ((house / BOX_SIZE) * BOX_SIZE, (house % BOX_SIZE) * BOX_SIZE);
            let box_cells = (0..SIZE).map(|i| (box_row + i / BOX_SIZE, box_col + i % BOX_SIZE));
            Self::check_house(candidate, box_cells, house, ViolationKind::DuplicateInBox, &mut violations);
        }

        let is_valid = violations.is_empty();
        let error_message = if is_valid {
            None
        } else {
            Some(
                violations
                    .iter()
                    .take(5)
                    .map(|v| v.description.as_str())
                    .join("; "),
            )
        };

        ValidationResult {
            is_valid,
            violations,
            error_message,
        }
    }

    fn check_house(
        board: &Board,
        cells: impl Iterator<Item = (usize, usize)>,
        house: usize,
        kind: ViolationKind,
        violations: &mut Vec<RuleViolation>,
    ) {
        let name = match kind {
            ViolationKind::DuplicateInRow => "Row",
            ViolationKind::DuplicateInColumn => "Column",
            ViolationKind::DuplicateInBox => "Box",
            ViolationKind::BlankCell | ViolationKind::ClueChanged => return,
        };
        for digit in cells.filter_map(|(row, col)| board.get(row, col)).duplicates() {
            violations.push(RuleViolation {
                kind,
                position: (house, 0),
                digit: Some(digit),
                description: format!("{} {} repeats digit {}", name, house, digit),
            });
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Violations: {}", self.violations.len())?;
        for violation in self.violations.iter().take(10) {
            writeln!(f, "    - {}", violation.description)?;
        }
        if self.violations.len() > 10 {
            writeln!(f, "    ... and {} more", self.violations.len() - 10)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::examples;

    #[test]
    fn test_valid_solution() {
        let puzzle = Board::parse(examples::CLASSIC).unwrap();
        let solution = Board::parse(examples::CLASSIC_SOLUTION).unwrap();
        let result = SolutionValidator::new().validate(&puzzle, &solution);

        assert!(result.is_valid);
        assert!(result.violations.is_empty());
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_blank_cells_reported() {
        let puzzle = Board::parse(examples::CLASSIC).unwrap();
        let result = SolutionValidator::new().validate(&puzzle, &puzzle);

        assert!(!result.is_valid);
        let blanks = result
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::BlankCell)
            .count();
        assert_eq!(blanks, 81 - 32);
    }

    #[test]
    fn test_swapped_digits_break_clue_and_houses() {
        let puzzle = Board::parse(examples::CLASSIC).unwrap();
        let mut solution = Board::parse(examples::CLASSIC_SOLUTION).unwrap();
        // (0, 2) is a clue 3; overwrite it with 4, duplicating the 4 at (0, 0)
        solution.set(0, 2, 4).unwrap();

        let result = SolutionValidator::new().validate(&puzzle, &solution);
        assert!(!result.is_valid);

        let kinds: Vec<ViolationKind> = result.violations.iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationKind::ClueChanged));
        assert!(kinds.contains(&ViolationKind::DuplicateInRow));
        assert!(kinds.contains(&ViolationKind::DuplicateInBox));
        assert!(result.error_message.unwrap().contains("clue is 3"));
    }

    #[test]
    fn test_column_duplicate() {
        let puzzle = Board::empty();
        let mut solution = Board::parse(examples::CLASSIC_SOLUTION).unwrap();
        // column 0 is 4 9 2 5 7 1 3 8 6; make row 8 repeat the 4
        solution.set(8, 0, 4).unwrap();

        let result = SolutionValidator::new().validate(&puzzle, &solution);
        assert!(result
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::DuplicateInColumn && v.position.0 == 0));
    }

    #[test]
    fn test_house_names_in_descriptions() {
        let mut board = Board::parse(examples::CLASSIC_SOLUTION).unwrap();
        // (0, 0) is 4 and (1, 1) is 6; both sit in box 0
        board.set(1, 1, 4).unwrap();

        let result = SolutionValidator::new().validate(&Board::empty(), &board);
        let boxed: Vec<&RuleViolation> = result
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::DuplicateInBox)
            .collect();
        assert_eq!(boxed.len(), 1);
        assert_eq!(boxed[0].description, "Box 0 repeats digit 4");

        let mut cell_rule = Vec::new();
        let cells = (0..SIZE).map(|col| (0, col));
        SolutionValidator::check_house(&board, cells, 0, ViolationKind::ClueChanged, &mut cell_rule);
        assert!(cell_rule.is_empty());
    }
}
