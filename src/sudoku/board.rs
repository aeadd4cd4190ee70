//! 9×9 number-place board

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Digits per house and houses per axis
pub const SIZE: usize = 9;
/// Width of a box
pub const BOX_SIZE: usize = 3;
/// Cells on the board
pub const CELL_COUNT: usize = SIZE * SIZE;

/// A board of 81 cells, each blank or holding a digit 1-9.
///
/// Serialized as its 81-character line form (`0` for blanks).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: [u8; CELL_COUNT],
}

impl Board {
    /// A board with every cell blank
    pub fn empty() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Parse a board from 81 cell characters.
    ///
    /// Digits `1`-`9` are clues, `0` and `.` are blanks, whitespace and `|`,
    /// `-`, `+` separators are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut board = Self::empty();
        let mut index = 0;
        for ch in text.chars() {
            let digit = match ch {
                '1'..='9' => ch as u8 - b'0',
                '0' | '.' => 0,
                c if c.is_whitespace() || matches!(c, '|' | '-' | '+') => continue,
                c => anyhow::bail!("Invalid character '{}' in puzzle", c),
            };
            if index >= CELL_COUNT {
                anyhow::bail!("Puzzle has more than {} cells", CELL_COUNT);
            }
            board.cells[index] = digit;
            index += 1;
        }
        if index != CELL_COUNT {
            anyhow::bail!("Puzzle has {} cells, expected {}", index, CELL_COUNT);
        }
        Ok(board)
    }

    /// Digit at a cell, `None` when blank or outside the board
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        match self.cells[row * SIZE + col] {
            0 => None,
            digit => Some(digit),
        }
    }

    /// Place a digit in a cell
    pub fn set(&mut self, row: usize, col: usize, digit: u8) -> Result<()> {
        if row >= SIZE || col >= SIZE {
            anyhow::bail!("Cell ({}, {}) is outside the board", row, col);
        }
        if !(1..=9).contains(&digit) {
            anyhow::bail!("Digit {} is not in 1-9", digit);
        }
        self.cells[row * SIZE + col] = digit;
        Ok(())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d != 0).count()
    }

    /// Whether no cell is blank
    pub fn is_complete(&self) -> bool {
        self.filled_count() == CELL_COUNT
    }

    /// Iterate over `(row, col, digit)` for every filled cell
    pub fn clues(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != 0)
            .map(|(i, &d)| (i / SIZE, i % SIZE, d))
    }

    /// The 81-character line form, `0` for blanks
    pub fn to_line(&self) -> String {
        self.cells.iter().map(|&d| char::from(b'0' + d)).collect()
    }

    /// Box index (0-8, row-major) of a cell
    pub fn box_index(row: usize, col: usize) -> usize {
        (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_line()
    }
}

impl TryFrom<String> for Board {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row > 0 && row % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..SIZE {
                if col > 0 && col % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                match self.get(row, col) {
                    Some(digit) => write!(f, "{}", digit)?,
                    None => write!(f, ".")?,
                }
                if col + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Load a board from a text file
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    Board::parse(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Load one board per non-empty line; lines starting with `#` are skipped
pub fn load_boards_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Board>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    content
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            Board::parse(line).with_context(|| format!("Invalid puzzle on line {}", line_no + 1))
        })
        .collect()
}

/// Create example puzzle files
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    std::fs::write(dir.join("classic.txt"), format!("{}\n", examples::CLASSIC))
        .context("Failed to write classic.txt")?;

    let batch = [examples::CLASSIC, examples::HARD, examples::SPARSE].join("\n");
    std::fs::write(dir.join("batch.txt"), batch + "\n").context("Failed to write batch.txt")?;

    Ok(())
}

/// Well-known puzzles
pub mod examples {
    pub const CLASSIC: &str =
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300";
    pub const CLASSIC_SOLUTION: &str =
        "483921657967345821251876493548132976729564138136798245372689514814253769695417382";
    pub const HARD: &str =
        "769000028000400009000000005005000000090860070280003000008300091002080600000000200";
    pub const HARD_SOLUTION: &str =
        "769531428521478369834296715175942836493865172286713954648327591352189647917654283";
    pub const SPARSE: &str =
        "000000010400000000020000000000050407008000300001090000300400200050100000000806000";
    pub const SPARSE_SOLUTION: &str =
        "693784512487512936125963874932651487568247391741398625319475268856129743274836159";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_line() {
        let board = Board::parse(examples::CLASSIC).unwrap();
        assert_eq!(board.get(0, 0), None);
        assert_eq!(board.get(0, 2), Some(3));
        assert_eq!(board.get(8, 6), Some(3));
        assert_eq!(board.filled_count(), 32);
        assert_eq!(board.to_line(), examples::CLASSIC);
    }

    #[test]
    fn test_parse_grid_layout() {
        let text = board_with_dots(examples::CLASSIC);
        let board: Board = text.parse().unwrap();
        assert_eq!(board.to_line(), examples::CLASSIC);
    }

    fn board_with_dots(line: &str) -> String {
        let mut out = String::new();
        for (i, ch) in line.chars().enumerate() {
            out.push(if ch == '0' { '.' } else { ch });
            if i % 9 == 8 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out
    }

    #[test]
    fn test_parse_errors() {
        assert!(Board::parse("123").is_err());
        assert!(Board::parse(&"0".repeat(82)).is_err());
        assert!(Board::parse(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_set_and_bounds() {
        let mut board = Board::empty();
        board.set(4, 4, 5).unwrap();
        assert_eq!(board.get(4, 4), Some(5));
        assert!(board.set(9, 0, 1).is_err());
        assert_eq!(board.get(9, 0), None);
        assert_eq!(board.get(0, 9), None);
        assert!(board.set(0, 0, 0).is_err());
        assert!(board.set(0, 0, 10).is_err());
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Board::box_index(0, 0), 0);
        assert_eq!(Board::box_index(4, 7), 5);
        assert_eq!(Board::box_index(8, 8), 8);
    }

    #[test]
    fn test_display_contains_separators() {
        let board = Board::parse(examples::CLASSIC).unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 11);
        assert!(text.starts_with(". . 3 | . 2 . | 6 . ."));
    }

    #[test]
    fn test_serde_as_line() {
        let board = Board::parse(examples::CLASSIC).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, format!("\"{}\"", examples::CLASSIC));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_example_files() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        let classic = load_board_from_file(temp_dir.path().join("classic.txt")).unwrap();
        assert_eq!(classic.to_line(), examples::CLASSIC);

        let batch = load_boards_from_file(temp_dir.path().join("batch.txt")).unwrap();
        assert_eq!(batch.len(), 3);
    }
}
