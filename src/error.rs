// Error types for the hotel listing engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("No tokio runtime available: {0}")]
    NoRuntime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ListingError>;
