//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Unreadable stored records are not an error: reads skip them and report
/// through `tracing`, since the remaining valid items must stay usable.
#[derive(Error, Debug)]
pub enum CartError {
    /// The candidate passed to add/remove is not a usable line item.
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    /// The underlying key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] stash_store::StoreError),
}
