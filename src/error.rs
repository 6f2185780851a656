//! Error types for aegis-code
//!
//! Two layers of failure exist. `ParseFailure` is the only thing that can go
//! wrong inside the structure extractor and is always turned into an error
//! document before it reaches a caller. `AegisError` covers everything the
//! command line tool can run into around it (files, config, output).

use std::fmt;
use std::process::ExitCode;

use thiserror::Error;

use crate::schema::Location;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, AegisError>;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AegisError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported file type: .{extension} (expected a Python source)")]
    UnsupportedLanguage { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl AegisError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(3),
            Self::UnsupportedLanguage { .. } => ExitCode::from(4),
            Self::Config { .. } => ExitCode::from(5),
            Self::Io(_) | Self::Serialization { .. } => ExitCode::FAILURE,
        }
    }
}

impl From<serde_json::Error> for AegisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// A source text that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Parser diagnostic
    pub message: String,
    /// Where the parser gave up, when known
    pub location: Option<Location>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "{} (line {}, column {})",
                self.message, loc.line, loc.column
            ),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseFailure {}
