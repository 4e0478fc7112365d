//! Error types for the candy crush agent

use thiserror::Error;

/// Main error type for the agent crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("missing {what} on line {line}")]
    MissingLine { what: &'static str, line: usize },

    #[error("invalid {what} '{value}' on line {line}")]
    InvalidNumber {
        what: &'static str,
        value: String,
        line: usize,
    },

    #[error("invalid board dimension {size} (expected 1..={max})")]
    InvalidDimension { size: usize, max: usize },

    #[error("invalid token alphabet size {size} (expected 1..={max})")]
    InvalidAlphabet { size: usize, max: usize },

    #[error("row {row} has {got} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unexpected symbol '{symbol}' at row {row}, column {col}")]
    UnexpectedSymbol { symbol: char, row: usize, col: usize },

    #[error("invalid move: cell ({row}, {col}) is empty or off the board")]
    InvalidMove { row: usize, col: usize },

    #[error("invalid move designator '{value}'")]
    InvalidDesignator { value: String },

    #[error("no search iteration completed before the deadline")]
    NoCompletedIteration,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an I/O error with a short description of what was attempted
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
