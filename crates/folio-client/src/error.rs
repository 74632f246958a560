//! Error types for the content client.

use folio_model::ValidationError;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The requested singleton or artifact is absent (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Submission failed a local check before it was sent
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    /// The API rejected the request (400)
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// Any other non-success status
    #[error("unexpected response: {status} {message}")]
    Status { status: u16, message: String },

    /// Transport or decoding failure
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
