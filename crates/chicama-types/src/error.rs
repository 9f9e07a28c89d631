//! Error types for chicama.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for chicama operations.
pub type Result<T> = std::result::Result<T, ChicamaError>;

/// Errors that can occur during a fetch session.
#[derive(Error, Debug)]
pub enum ChicamaError {
    /// The source could not issue a request or deliver a batch.
    #[error("Source error: {0}")]
    Source(String),

    /// A bar timestamp could not be normalized.
    #[error("Normalize error: {0}")]
    Normalize(String),

    /// The sink rejected a row or failed to close.
    #[error("Sink error: {0}")]
    Sink(String),

    /// The requested symbol is not in the contract registry.
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// The fetch window is invalid.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// The source went silent mid-batch.
    #[error("Source stalled: no bar or end-of-batch within {0:?}")]
    Stalled(std::time::Duration),

    /// The session was cancelled before completion.
    #[error("Session cancelled")]
    Cancelled,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors for invalid fetch windows.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// The start date is not strictly before the end date.
    #[error("Invalid fetch window: {from} is not before {to}")]
    Empty {
        /// Start of the rejected window.
        from: NaiveDate,
        /// End of the rejected window.
        to: NaiveDate,
    },
}
