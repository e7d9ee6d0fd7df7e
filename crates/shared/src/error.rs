//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input on record creation or query parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A cutoff was attempted with nothing new to summarize.
    #[error("Empty period: {0}")]
    EmptyPeriod(String),

    /// Config provider or record store could not be reached.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::EmptyPeriod(_) => 422,
            Self::CollaboratorUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmptyPeriod(_) => "EMPTY_PERIOD",
            Self::CollaboratorUnavailable(_) => "COLLABORATOR_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
