//! String-keyed persistent storage for the stash cart.
//!
//! Provides the [`KeyValueStore`] capability — a synchronous, string-keyed
//! persistent map with structured (JSON) read/write helpers — and two
//! backends: an in-process [`MemoryStore`] and a durable [`FileStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use stash_store::{KeyValueStore, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Preferences {
//!     currency: String,
//! }
//!
//! let store = MemoryStore::new();
//!
//! // Plain string values
//! store.write("greeting", "hello")?;
//!
//! // Structured values, serialized to JSON
//! store.write_structured("prefs", &Preferences { currency: "GBP".into() })?;
//! let prefs: Option<Preferences> = store.read_structured("prefs")?;
//! ```

mod backend;
mod error;
mod file;
mod memory;

pub use backend::KeyValueStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, MemoryStore, StoreError};
}
