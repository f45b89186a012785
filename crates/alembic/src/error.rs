//! Error types for the Alembic library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Alembic operations.
#[derive(Debug, Error)]
pub enum AlembicError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension does not map to a supported source kind.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Source bytes cannot be interpreted as the claimed format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the embedded SQLite engine.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A SQL script or database file yielded zero usable tables.
    #[error("No table found: {0}")]
    NoTable(String),

    /// Empty file or no data to summarize.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A report renderer could not produce or write its output.
    #[error("Render error for '{path}': {message}")]
    Render { path: PathBuf, message: String },
}

/// Result type alias for Alembic operations.
pub type Result<T> = std::result::Result<T, AlembicError>;
