//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::aggregator::StatsScope;
use thiserror::Error;

/// Errors that can occur while turning a log line into collection events
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line does not split into `<date>: <seconds>: <info>`
    #[error("Line {line_number}: unknown line format: {reason}")]
    LineFormat { line_number: usize, reason: String },

    /// A recognised collection region lacks a pause or heap measurement
    #[error("Line {line_number}: invalid collection measurement: {reason}")]
    Measurement { line_number: usize, reason: String },
}

impl ParseError {
    /// Line number (1-based) the error was raised on, 0 when unknown
    pub fn line_number(&self) -> usize {
        match self {
            ParseError::LineFormat { line_number, .. }
            | ParseError::Measurement { line_number, .. } => *line_number,
        }
    }

    /// Same error, attributed to `line_number`
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            ParseError::LineFormat { reason, .. } => ParseError::LineFormat {
                line_number,
                reason,
            },
            ParseError::Measurement { reason, .. } => ParseError::Measurement {
                line_number,
                reason,
            },
        }
    }
}

/// Errors raised when reading statistics out of the aggregator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("No {scope} collections were found in the log, cannot report their statistics")]
    EmptyInput { scope: StatsScope },
}

/// Errors that can occur while opening or reading the log file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read log file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
