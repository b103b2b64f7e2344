//! Error types for the kadaical ecosystem.

use thiserror::Error;

/// Errors that can occur while producing a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No schedule found for year {0}")]
    YearNotFound(u16),

    #[error("Malformed schedule row: {0}")]
    MalformedRow(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
