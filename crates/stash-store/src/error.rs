//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using a key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not service the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Failed to serialize or deserialize a structured value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
