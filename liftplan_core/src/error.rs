//! Error types for the liftplan_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Level of the program tree an index addresses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Program,
    Week,
    Day,
    Exercise,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Program => "program",
            Level::Week => "week",
            Level::Day => "day",
            Level::Exercise => "exercise",
        };
        f.write_str(name)
    }
}

/// Core error type for liftplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required text field was empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// A numeric field was given a value it cannot hold
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Positional address does not exist in the program tree
    #[error("{level} index {index} out of range (have {len})")]
    IndexOutOfRange { level: Level, index: usize, len: usize },

    /// No catalog entry carries this id
    #[error("Unknown exercise id: {0}")]
    UnknownExercise(u32),
}
