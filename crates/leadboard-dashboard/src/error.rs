//! Error types for the remote lead source

use thiserror::Error;

/// Result type alias for lead source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Ways a lead load can fail
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection, TLS or body transfer failure
    #[error("Failed to reach lead source: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with a non-success status
    #[error("Lead source returned error status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body is not a JSON array of lead records
    #[error("Lead source returned an unreadable payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The source could not serve leads for another reason
    #[error("Lead source unavailable: {message}")]
    Unavailable {
        /// Reason reported by the source
        message: String,
    },
}
