//! Error types
//!
//! `FetchError` describes failures of the data-fetch collaborator; `ApiError`
//! is what controller, configuration and logging operations return.

use thiserror::Error;

/// Failure reported by a `NodeFetcher` or `TokenSource`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be sent or no response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status.
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a valid node listing.
    #[error("Failed to decode node listing: {0}")]
    Decode(String),

    /// No usable access token.
    #[error("Authentication unavailable: {0}")]
    Auth(String),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
