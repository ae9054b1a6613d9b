//! Transport error type.

use thiserror::Error;

/// Failure of a single HTTP exchange (no response was obtained).
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connect, TLS, timeout, reset, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The request could not be built (bad URL, header, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The blocking worker running the transfer panicked or was cancelled.
    #[error("transport task failed: {0}")]
    Task(String),
    /// Generic network failure, for transports without a richer error type.
    #[error("{0}")]
    Network(String),
}

impl From<tokio::task::JoinError> for TransportError {
    fn from(e: tokio::task::JoinError) -> Self {
        TransportError::Task(e.to_string())
    }
}
