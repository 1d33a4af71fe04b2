//! Load-specific error types
//!
//! Errors raised while fetching and decoding the master collection. The
//! gallery absorbs every one of them: a failed load leaves the projection empty
//! and is never retried.
//!
//! # Error Types
//!
//! - **`Io`**: The data file could not be read
//! - **`Malformed`**: The payload is not a JSON array of media records
//! - **`InvalidDate`**: A record carries a date that is not an ISO 8601 date or datetime

use thiserror::Error;

/// Errors that can occur while loading the media collection
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data source could not be read
    #[error("Failed to read data source: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be decoded
    #[error("Malformed collection payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record's date could not be parsed
    #[error("Invalid date {date:?} for item {url}")]
    InvalidDate {
        /// Identifier of the offending record
        url: String,
        /// Raw date text
        date: String,
    },
}

/// Result type for load operations
pub type Result<T> = std::result::Result<T, LoadError>;
