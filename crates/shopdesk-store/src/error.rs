//! Store error types.

use thiserror::Error;

/// Errors that can occur when using a row store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to reach the backing store.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Failed to serialize a row for storage.
    #[error("Row serialization failed: {0}")]
    Serialize(String),

    /// Failed to deserialize a stored row.
    #[error("Row deserialization failed: {0}")]
    Deserialize(String),

    /// No row found when one was expected.
    #[error("Row not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Deserialize(e.to_string())
    }
}
