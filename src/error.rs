//! Error types for the person store.

use crate::types::RecordId;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Person not found: {0}")]
    NotFound(RecordId),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// HTTP status a request layer should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::InvalidArgument(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::BackendUnavailable(_) | StoreError::Internal(_) => 500,
        }
    }
}

impl From<hex::FromHexError> for StoreError {
    fn from(e: hex::FromHexError) -> Self {
        StoreError::InvalidArgument(format!("malformed record id: {}", e))
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        let message = e.to_string();
        match e.kind.as_ref() {
            ErrorKind::BsonSerialization(_) | ErrorKind::InvalidArgument { .. } => {
                StoreError::InvalidArgument(message)
            }
            _ => StoreError::Internal(message),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
