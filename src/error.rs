//! Error types for the library aggregation engine.

use thiserror::Error;

/// Errors that can occur while building or serving a user's track index.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The caller did not supply a usable user identifier.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Transport-level failure talking to the provider (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Upstream returned {status} for {url}: {message}")]
    Upstream {
        status: u16,
        url: String,
        message: String,
    },

    /// A page body could not be parsed.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The continuation chain was longer than the configured page cap.
    #[error("Pagination limit of {limit} pages exceeded at {url}")]
    PaginationLimitExceeded { url: String, limit: usize },

    /// The bearer token supplier could not produce a token.
    #[error("Token request failed: {0}")]
    Token(String),

    /// The cache store could not be reached or refused the command.
    #[error("Cache store error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A fan-out unit panicked or the limiter was closed.
    #[error("Fetch task failed: {0}")]
    Task(String),

    #[error("Failed to serialize track index: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<redis::RedisError> for LibraryError {
    fn from(err: redis::RedisError) -> Self {
        LibraryError::Cache(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
