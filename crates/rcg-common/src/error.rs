//! Error types for roddy config grouping.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for config grouping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for config grouping.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("incompatible settings schema version: {0}")]
    IncompatibleSchema(String),

    // Version info errors (20-29)
    #[error("couldn't parse Roddy version from '{line}' in {path}")]
    VersionHeader { path: PathBuf, line: String },

    #[error("cannot read version info {path}: {source}")]
    VersionInfoUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Store errors (30-39)
    #[error("cannot read parameter file {path}: {source}")]
    ParameterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list store directory {path}: {source}")]
    StoreListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Summarizer errors (40-49)
    #[error("summarizer {name} failed: {message}")]
    Summarizer { name: String, message: String },

    #[error("summarizer not found: {0}")]
    SummarizerMissing(PathBuf),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used to pick the process exit code and for diagnostics.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::IncompatibleSchema(_) => 11,
            Error::VersionHeader { .. } => 20,
            Error::VersionInfoUnreadable { .. } => 21,
            Error::ParameterFile { .. } => 30,
            Error::StoreListing { .. } => 31,
            Error::Summarizer { .. } => 40,
            Error::SummarizerMissing(_) => 41,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
