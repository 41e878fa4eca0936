//! The cart store: persistence, reconciliation, expiration, totals.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use stash_store::KeyValueStore;

use crate::{CartError, CartTotals, LineItem};

/// Default expiration window: an untouched cart is wiped after 7 days.
pub const DEFAULT_EXPIRATION_WINDOW: Duration = Duration::from_secs(7 * 24 * 3600);

/// Storage keys and expiration settings for a [`CartStore`].
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key holding the serialized list of line items.
    pub cart_key: String,
    /// Key holding the last-updated timestamp, stored as a bare
    /// epoch-millisecond string.
    pub updated_at_key: String,
    /// How long an untouched cart stays alive.
    pub expiration_window: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            cart_key: "cart".to_string(),
            updated_at_key: "cart:updated-at".to_string(),
            expiration_window: DEFAULT_EXPIRATION_WINDOW,
        }
    }
}

/// The canonical cart: an ordered list of line items persisted through a
/// [`KeyValueStore`].
///
/// Every mutation rewrites the whole serialized list, so the stored state is
/// always exactly the last successful write. Items merge by `name`; no two
/// stored items share one. Single-writer only: two processes mutating the
/// same backend race, and the last writer wins.
pub struct CartStore<S: KeyValueStore> {
    storage: S,
    config: CartConfig,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store with the default keys and a 7-day expiration window.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, CartConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config(storage: S, config: CartConfig) -> Self {
        Self { storage, config }
    }

    /// Add a candidate to the cart.
    ///
    /// An item already in the cart under the same name has its quantity
    /// incremented by 1; a new name is appended with quantity forced to 1.
    /// The expiration policy runs first, so an expired cart is wiped before
    /// the add and the result holds only the new item.
    pub fn add_line_item(&self, candidate: &LineItem) -> Result<(), CartError> {
        candidate.validate()?;
        self.check_expiration()?;

        let mut items = self.load_items()?;
        match items.iter_mut().find(|item| item.name == candidate.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => {
                let mut added = candidate.clone();
                added.quantity = 1;
                items.push(added);
            }
        }
        self.persist_items(&items)
    }

    /// Remove a candidate from the cart, matching by name.
    ///
    /// With `remove_all` the whole line goes. Otherwise the quantity drops
    /// by 1, and the line goes once it would reach 0; items are never stored
    /// at quantity 0. No matching name is a no-op and nothing is rewritten.
    pub fn remove_line_item(
        &self,
        candidate: &LineItem,
        remove_all: bool,
    ) -> Result<(), CartError> {
        candidate.validate()?;
        self.check_expiration()?;

        let mut items = self.load_items()?;
        let Some(index) = items.iter().position(|item| item.name == candidate.name) else {
            return Ok(());
        };
        if !remove_all && items[index].quantity > 1 {
            items[index].quantity -= 1;
        } else {
            items.retain(|item| item.name != candidate.name);
        }
        self.persist_items(&items)
    }

    /// Read the persisted items, in stored order.
    ///
    /// Records that fail reconstruction are skipped with a warning; callers
    /// only ever see valid items. An empty or absent cart reads as an empty
    /// list.
    pub fn items(&self) -> Result<Vec<LineItem>, CartError> {
        self.load_items()
    }

    /// Compute aggregate totals over the persisted items.
    ///
    /// Performs no mutation and no expiration check.
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        let items = self.load_items()?;
        Ok(items.iter().fold(CartTotals::default(), |mut totals, item| {
            totals.total_price += item.subtotal();
            totals.total_quantity += item.quantity;
            totals
        }))
    }

    /// Sum of quantities across the cart; what a bag counter shows.
    pub fn item_count(&self) -> Result<i64, CartError> {
        Ok(self.totals()?.total_quantity)
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> Result<bool, CartError> {
        Ok(self.load_items()?.is_empty())
    }

    /// Wipe the cart: items and timestamp both go, leaving state
    /// indistinguishable from a never-used cart.
    pub fn clear(&self) -> Result<(), CartError> {
        self.storage.remove(&self.config.cart_key)?;
        self.storage.remove(&self.config.updated_at_key)?;
        Ok(())
    }

    /// Expiration gate, run before every mutation.
    ///
    /// First use stamps now. A stale stamp wipes the cart and restamps. A
    /// fresh stamp is left untouched: it marks the start of the cart's life,
    /// not its last access.
    fn check_expiration(&self) -> Result<(), CartError> {
        let Some(raw) = self.storage.read(&self.config.updated_at_key)? else {
            return self.stamp_now();
        };
        let Ok(stamped_ms) = raw.trim().parse::<u128>() else {
            tracing::warn!(value = %raw, "unreadable cart timestamp, restamping");
            return self.stamp_now();
        };
        let elapsed = now_ms().saturating_sub(stamped_ms);
        if elapsed > self.config.expiration_window.as_millis() {
            self.clear()?;
            self.stamp_now()?;
        }
        Ok(())
    }

    fn stamp_now(&self) -> Result<(), CartError> {
        self.storage
            .write(&self.config.updated_at_key, &now_ms().to_string())?;
        Ok(())
    }

    fn load_items(&self) -> Result<Vec<LineItem>, CartError> {
        let Some(raw) = self.storage.read(&self.config.cart_key)? else {
            return Ok(Vec::new());
        };
        let records: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "cart value is not a list, reading as empty");
                return Ok(Vec::new());
            }
        };
        let mut items = Vec::with_capacity(records.len());
        for record in &records {
            match LineItem::from_record(record) {
                Some(item) => items.push(item),
                None => tracing::warn!("skipping unreadable cart record"),
            }
        }
        Ok(items)
    }

    fn persist_items(&self, items: &[LineItem]) -> Result<(), CartError> {
        self.storage
            .write_structured(&self.config.cart_key, &items)?;
        Ok(())
    }
}

/// Current time as epoch milliseconds.
fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
