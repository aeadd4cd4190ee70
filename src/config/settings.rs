//! Configuration settings for the exact cover solver

use crate::dlx::{EnumerationPolicy, SearchOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub encoding: EncodingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub mode: SearchMode,
    pub max_solutions: usize,
    /// Zero disables the deadline
    pub timeout_seconds: u64,
}

/// Enumeration policy as written in configuration files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    First,
    Limit,
    Exhaustive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub matrix_file: PathBuf,
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_results: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Leave out blank-cell placements that clash with a clue
    pub prune_given_conflicts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                mode: SearchMode::Limit,
                max_solutions: 10,
                timeout_seconds: 300,
            },
            input: InputConfig {
                matrix_file: PathBuf::from("input/matrices/knuth.txt"),
                puzzle_file: PathBuf::from("input/puzzles/classic.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_results: false,
                output_directory: PathBuf::from("output/solutions"),
            },
            encoding: EncodingConfig {
                prune_given_conflicts: true,
            },
        }
    }
}

impl SolverConfig {
    /// The enumeration policy this configuration asks for
    pub fn policy(&self) -> EnumerationPolicy {
        match self.mode {
            SearchMode::First => EnumerationPolicy::FirstSolution,
            SearchMode::Limit => EnumerationPolicy::AtMost(self.max_solutions),
            SearchMode::Exhaustive => EnumerationPolicy::Exhaustive,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        let options = SearchOptions::new(self.policy());
        if self.timeout_seconds > 0 {
            options.with_timeout(Duration::from_secs(self.timeout_seconds))
        } else {
            options
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the solver settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.mode == SearchMode::Limit && self.solver.max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive in limit mode");
        }

        Ok(())
    }

    /// Validate the settings used by the relation solver
    pub fn validate_matrix_input(&self) -> Result<()> {
        self.validate()?;
        if !self.input.matrix_file.exists() {
            anyhow::bail!("Matrix file does not exist: {}", self.input.matrix_file.display());
        }
        Ok(())
    }

    /// Validate the settings used by the puzzle solver
    pub fn validate_puzzle_input(&self) -> Result<()> {
        self.validate()?;
        if !self.input.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.input.puzzle_file.display());
        }
        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(mode) = cli_overrides.mode {
            self.solver.mode = mode;
        }
        if let Some(max_solutions) = cli_overrides.max_solutions {
            self.solver.max_solutions = max_solutions;
        }
        if let Some(timeout_seconds) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout_seconds;
        }
        if let Some(ref matrix_file) = cli_overrides.matrix_file {
            self.input.matrix_file = matrix_file.clone();
        }
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_results = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub mode: Option<SearchMode>,
    pub max_solutions: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub matrix_file: Option<PathBuf>,
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_policy_mapping() {
        let mut solver = Settings::default().solver;
        assert_eq!(solver.policy(), EnumerationPolicy::AtMost(10));

        solver.mode = SearchMode::First;
        assert_eq!(solver.policy(), EnumerationPolicy::FirstSolution);

        solver.mode = SearchMode::Exhaustive;
        assert_eq!(solver.policy(), EnumerationPolicy::Exhaustive);
    }

    #[test]
    fn test_search_options_timeout() {
        let mut solver = Settings::default().solver;
        assert_eq!(solver.search_options().timeout, Some(Duration::from_secs(300)));

        solver.timeout_seconds = 0;
        assert_eq!(solver.search_options().timeout, None);
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.solver.max_solutions = 0;
        assert!(settings.validate().is_err());

        settings.solver.mode = SearchMode::Exhaustive;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/settings.yaml");

        let mut settings = Settings::default();
        settings.solver.mode = SearchMode::Exhaustive;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.mode, SearchMode::Exhaustive);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert!(loaded.encoding.prune_given_conflicts);
    }

    #[test]
    fn test_missing_input_files() {
        let mut settings = Settings::default();
        settings.input.matrix_file = PathBuf::from("/nonexistent/matrix.txt");
        settings.input.puzzle_file = PathBuf::from("/nonexistent/puzzle.txt");
        assert!(settings.validate_matrix_input().is_err());
        assert!(settings.validate_puzzle_input().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            mode: Some(SearchMode::First),
            max_solutions: Some(3),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.solver.mode, SearchMode::First);
        assert_eq!(settings.solver.max_solutions, 3);
        assert_eq!(settings.output.output_directory, PathBuf::from("out"));
        assert!(settings.output.save_results);
        assert_eq!(settings.solver.timeout_seconds, 300);
    }
}
