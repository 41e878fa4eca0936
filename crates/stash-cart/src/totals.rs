//! Aggregate cart totals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Price and quantity aggregates over the whole cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of unit price times quantity across all items.
    pub total_price: f64,
    /// Sum of quantities across all items.
    pub total_quantity: i64,
}

impl fmt::Display for CartTotals {
    /// The bag-counter label: `"6£ (2)"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00a3} ({})", self.total_price, self.total_quantity)
    }
}
