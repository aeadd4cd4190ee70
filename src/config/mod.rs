//! Configuration management for the exact cover solver

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, InputConfig, OutputConfig, OutputFormat, SearchMode, Settings,
    SolverConfig,
};
