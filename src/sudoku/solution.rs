//! Solved puzzles and their metadata

use super::board::Board;
use super::encoder::Placement;
use crate::dlx::SearchStats;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A filled board produced from one exact cover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SudokuSolution {
    /// The puzzle as given
    pub puzzle: Board,
    /// The completed board
    pub board: Board,
    /// Placements chosen by the cover, in selection order
    pub placements: Vec<Placement>,
    /// Time from encoding to decoding
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the completed board
    pub id: String,
    /// Position among the solutions of the same search, starting at 1
    pub index: usize,
    pub clue_count: usize,
    /// Whether an exhaustive search proved this the only solution
    pub unique: bool,
    pub search: SearchStats,
}

/// Compact record for summary files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub id: String,
    pub puzzle: String,
    pub solution: String,
    pub clue_count: usize,
    pub solve_time_ms: u64,
    pub search_calls: u64,
}

impl SudokuSolution {
    pub fn new(
        puzzle: Board,
        board: Board,
        placements: Vec<Placement>,
        solve_time: Duration,
        metadata: SolutionMetadata,
    ) -> Self {
        Self {
            puzzle,
            board,
            placements,
            solve_time,
            metadata,
        }
    }

    /// Cells the solver filled in, as placements not present in the puzzle
    pub fn deductions(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.placements
            .iter()
            .filter(|p| self.puzzle.get(p.row, p.col).is_none())
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            id: self.metadata.id.clone(),
            puzzle: self.puzzle.to_line(),
            solution: self.board.to_line(),
            clue_count: self.metadata.clue_count,
            solve_time_ms: u64::try_from(self.solve_time.as_millis()).unwrap_or(u64::MAX),
            search_calls: self.metadata.search.calls,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    pub fn new(board: &Board, index: usize, clue_count: usize, unique: bool, search: SearchStats) -> Self {
        Self {
            id: Self::generate_id(board),
            index,
            clue_count,
            unique,
            search,
        }
    }

    fn generate_id(board: &Board) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}
