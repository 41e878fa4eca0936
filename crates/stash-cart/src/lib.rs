//! Client-side shopping cart persistence and reconciliation.
//!
//! The cart is a derived view over a [`stash_store::KeyValueStore`]: one key
//! holds the serialized list of line items, a second holds a last-updated
//! epoch-millisecond timestamp used for expiration. Every mutation is a
//! synchronous read-modify-write that rewrites the whole list, which keeps
//! the no-duplicate-names invariant trivially true.
//!
//! Items merge by `name`: adding a product already in the cart increments
//! its quantity instead of appending a second line.
//!
//! # Example
//!
//! ```rust,ignore
//! use stash_cart::{CartStore, LineItem};
//! use stash_store::MemoryStore;
//!
//! let cart = CartStore::new(MemoryStore::new());
//!
//! let tea = LineItem::new("Tea", 3.0)?;
//! cart.add_line_item(&tea)?;
//! cart.add_line_item(&tea)?;
//!
//! let totals = cart.totals()?;
//! assert_eq!(totals.total_price, 6.0);
//! assert_eq!(totals.total_quantity, 2);
//! ```
//!
//! Not safe for concurrent mutation from multiple processes (two tabs, two
//! handles on the same file): the last writer wins.

mod error;
mod line_item;
mod store;
mod totals;

pub use error::CartError;
pub use line_item::LineItem;
pub use store::{CartConfig, CartStore, DEFAULT_EXPIRATION_WINDOW};
pub use totals::CartTotals;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartConfig, CartError, CartStore, CartTotals, LineItem};
}
