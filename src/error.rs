//! Error types for listwrangle.
//!
//! This module defines the error types returned by scraping operations.
//! Per-selector probe failures are deliberately not represented here: a
//! malformed selector is recovered inline and never aborts a run.

/// Error type for scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was rejected before any network activity started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// CSV serialization failed while persisting records.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure while persisting records.
    #[error("file write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;
