/// Core error types for Tapedeck
use crate::types::TrackId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Two catalog entries share an id
    #[error("Duplicate track id: {0}")]
    DuplicateTrackId(TrackId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
