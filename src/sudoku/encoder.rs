//! Encoding a board as an exact cover relation and decoding covers back
//!
//! Every candidate placement of a digit in a cell is one relation row that
//! covers four items:
//!
//! | items     | constraint                      |
//! |-----------|---------------------------------|
//! | 0..81     | cell (r, c) is filled           |
//! | 81..162   | row r contains digit d          |
//! | 162..243  | column c contains digit d       |
//! | 243..324  | box b contains digit d          |

use super::board::{Board, CELL_COUNT, SIZE};
use crate::config::EncodingConfig;
use crate::dlx::CoverSolution;
use crate::relation::Relation;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of items in the encoding
pub const ITEM_COUNT: usize = 4 * CELL_COUNT;

const ROW_OFFSET: usize = CELL_COUNT;
const COLUMN_OFFSET: usize = 2 * CELL_COUNT;
const BOX_OFFSET: usize = 3 * CELL_COUNT;

/// Placing `digit` in cell (`row`, `col`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

impl Placement {
    pub fn new(row: usize, col: usize, digit: u8) -> Self {
        Self { row, col, digit }
    }

    /// The four items this placement covers, ascending
    pub fn items(&self) -> [usize; 4] {
        let d = usize::from(self.digit - 1);
        let b = Board::box_index(self.row, self.col);
        [
            self.row * SIZE + self.col,
            ROW_OFFSET + self.row * SIZE + d,
            COLUMN_OFFSET + self.col * SIZE + d,
            BOX_OFFSET + b * SIZE + d,
        ]
    }
}

/// A board's relation together with the placement behind each relation row
#[derive(Debug, Clone)]
pub struct EncodedPuzzle {
    pub relation: Relation,
    pub placements: Vec<Placement>,
    pub statistics: EncodingStatistics,
}

/// Size of an encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingStatistics {
    pub items: usize,
    pub rows: usize,
    pub nodes: usize,
    pub clues: usize,
    /// Blank-cell placements left out because they clash with a clue
    pub pruned: usize,
}

/// Turns boards into relations and exact covers into boards
#[derive(Debug, Clone)]
pub struct SudokuEncoder {
    prune_given_conflicts: bool,
}

impl SudokuEncoder {
    pub fn new(config: &EncodingConfig) -> Self {
        Self {
            prune_given_conflicts: config.prune_given_conflicts,
        }
    }

    /// Encode a board.
    ///
    /// Clue cells get exactly one row, the clue itself. Blank cells get one
    /// row per digit, minus those clashing with a clue when pruning is on.
    pub fn encode(&self, board: &Board) -> Result<EncodedPuzzle> {
        let mut given = vec![false; ITEM_COUNT];
        for (row, col, digit) in board.clues() {
            for item in Placement::new(row, col, digit).items() {
                given[item] = true;
            }
        }

        let mut relation = Relation::new(ITEM_COUNT)?;
        let mut placements = Vec::new();
        let mut pruned = 0;

        for row in 0..SIZE {
            for col in 0..SIZE {
                let candidates: Vec<u8> = match board.get(row, col) {
                    Some(digit) => vec![digit],
                    None => (1..=9).collect(),
                };
                for digit in candidates {
                    let placement = Placement::new(row, col, digit);
                    let items = placement.items();
                    if board.get(row, col).is_none()
                        && self.prune_given_conflicts
                        && items.iter().any(|&item| given[item])
                    {
                        pruned += 1;
                        continue;
                    }
                    relation
                        .push_items(&items)
                        .context("Failed to add placement row")?;
                    placements.push(placement);
                }
            }
        }

        let statistics = EncodingStatistics {
            items: ITEM_COUNT,
            rows: relation.row_count(),
            nodes: relation.set_count(),
            clues: board.filled_count(),
            pruned,
        };
        log::debug!(
            "encoded puzzle: {} rows, {} pruned placements",
            statistics.rows,
            statistics.pruned
        );

        Ok(EncodedPuzzle {
            relation,
            placements,
            statistics,
        })
    }

    /// Fill a board from the placements an exact cover selected
    pub fn decode(&self, encoded: &EncodedPuzzle, solution: &CoverSolution) -> Result<Board> {
        let mut board = Board::empty();
        for &row in solution.rows() {
            let placement = encoded
                .placements
                .get(row)
                .with_context(|| format!("Relation row {} has no placement", row))?;
            board.set(placement.row, placement.col, placement.digit)?;
        }
        if !board.is_complete() {
            anyhow::bail!(
                "Cover filled only {} of {} cells",
                board.filled_count(),
                CELL_COUNT
            );
        }
        Ok(board)
    }
}

impl Default for SudokuEncoder {
    fn default() -> Self {
        Self {
            prune_given_conflicts: true,
        }
    }
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Items: {}", self.items)?;
        writeln!(f, "  Candidate rows: {}", self.rows)?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Clues: {}", self.clues)?;
        writeln!(f, "  Pruned placements: {}", self.pruned)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::examples;

    #[test]
    fn test_placement_items() {
        let placement = Placement::new(4, 7, 3);
        assert_eq!(placement.items(), [43, 81 + 38, 162 + 65, 243 + 47]);

        let corner = Placement::new(0, 0, 1);
        assert_eq!(corner.items(), [0, 81, 162, 243]);
    }

    #[test]
    fn test_empty_board_encoding() {
        let encoded = SudokuEncoder::default().encode(&Board::empty()).unwrap();
        assert_eq!(encoded.relation.width(), 324);
        assert_eq!(encoded.relation.row_count(), 729);
        assert_eq!(encoded.statistics.nodes, 4 * 729);
        assert_eq!(encoded.statistics.pruned, 0);
        assert!(encoded.relation.uncoverable_items().is_empty());
    }

    #[test]
    fn test_clue_cells_get_single_row() {
        let board = Board::parse(examples::CLASSIC).unwrap();
        let encoder = SudokuEncoder::new(&EncodingConfig {
            prune_given_conflicts: false,
        });
        let encoded = encoder.encode(&board).unwrap();

        assert_eq!(encoded.relation.row_count(), 32 + 49 * 9);
        let clue_rows: Vec<_> = encoded
            .placements
            .iter()
            .filter(|p| p.row == 0 && p.col == 2)
            .collect();
        assert_eq!(clue_rows, vec![&Placement::new(0, 2, 3)]);
    }

    #[test]
    fn test_pruning_removes_conflicting_candidates() {
        let board = Board::parse(examples::CLASSIC).unwrap();
        let encoded = SudokuEncoder::default().encode(&board).unwrap();

        assert!(encoded.statistics.pruned > 0);
        assert_eq!(
            encoded.relation.row_count() + encoded.statistics.pruned,
            32 + 49 * 9
        );
        // row 0 already holds a 3, so no 3 is offered elsewhere in it
        assert!(!encoded
            .placements
            .iter()
            .any(|p| p.row == 0 && p.digit == 3 && p.col != 2));
    }

    #[test]
    fn test_decode_rejects_partial_cover() {
        let encoder = SudokuEncoder::default();
        let encoded = encoder.encode(&Board::empty()).unwrap();
        assert!(encoder.decode(&encoded, &CoverSolution::new(vec![0])).is_err());
        assert!(encoder
            .decode(&encoded, &CoverSolution::new(vec![100_000]))
            .is_err());
    }
}
