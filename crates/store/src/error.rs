//! Store errors.

use thiserror::Error;
use tracker_shared::AppError;

/// Errors talking to the record store or the config provider.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request could not be sent or timed out.
    #[error("{service} request failed: {source}")]
    Transport {
        /// Collaborator name.
        service: &'static str,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The collaborator answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Collaborator name.
        service: &'static str,
        /// Response status.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// The collaborator's response was not valid JSON.
    #[error("{service} returned an unreadable body: {message}")]
    Decode {
        /// Collaborator name.
        service: &'static str,
        /// Decoder message.
        message: String,
    },

    /// A configured base URL cannot address the collaborator.
    #[error("Invalid {service} base URL: {url}")]
    InvalidUrl {
        /// Collaborator name.
        service: &'static str,
        /// The configured URL.
        url: String,
    },

    /// The document could not be encoded for saving.
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Encode(e) => Self::Internal(e.to_string()),
            e @ StoreError::InvalidUrl { .. } => Self::Internal(e.to_string()),
            other => Self::CollaboratorUnavailable(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
