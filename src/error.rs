//! Error types for subway network operations.
//!
//! Every core failure is a deterministic validation failure: the caller has to
//! correct its input, nothing here is retryable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubwayError {
    /// Caller input violates a structural rule of a line or a query.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced station, line or route does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A CSV network description could not be imported.
    #[error("Import error: {0}")]
    Import(String),
}

impl SubwayError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using [`SubwayError`].
pub type Result<T> = std::result::Result<T, SubwayError>;
