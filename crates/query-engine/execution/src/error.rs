//! Errors of query execution.

/// A type for execution errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors, raised before any SQL is built or sent.
    #[error(transparent)]
    Spec(#[from] query_engine_translation::translation::error::Error),
    /// Transport failures, propagated unchanged. The engine performs no
    /// retry and no partial-result recovery.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A failure while sending SQL through a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http transport request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no built-in channel for the '{0}' transport mode")]
    UnsupportedMode(String),
    #[error("transport channel failed: {0}")]
    Channel(String),
}
