use std::path::PathBuf;
use thiserror::Error;

/// The source root could not be enumerated; nothing was loaded.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Data directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to walk data directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A file's content does not have the expected record shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Content is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Expected exactly one song record, found {0}")]
    MultipleRecords(u64),

    #[error("Line {line} is missing required field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line} has an out of range timestamp: {ts}")]
    InvalidTimestamp { line: usize, ts: i64 },
}

/// Why a single file could not be loaded. Any of these aborts the batch.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}
