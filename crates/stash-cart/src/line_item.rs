//! Line item model and reconstruction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CartError;

/// One product line in the cart.
///
/// Two line items with the same `name` are the same line; `id` is an opaque
/// display field and plays no part in identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Opaque identifier, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Product name; the merge key.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Display description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URI or path, display-only.
    #[serde(default, rename = "imageRef", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Units of this product. Always >= 1 once stored.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl LineItem {
    /// Create a line item with quantity 1.
    ///
    /// Fails when `name` is empty or whitespace-only; a name is the one
    /// field the cart cannot work without.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, CartError> {
        let item = Self {
            id: None,
            name: name.into(),
            price,
            description: None,
            image_ref: None,
            quantity: 1,
        };
        item.validate()?;
        Ok(item)
    }

    /// Set the opaque identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image reference.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Check that this item can act as an add/remove candidate.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.name.trim().is_empty() {
            return Err(CartError::InvalidLineItem(
                "name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Reconstruct a line item from a raw stored record.
    ///
    /// Copies only the recognized fields. `quantity` falls back to 1 when
    /// absent or not a positive integer; `price` coerces from a JSON number
    /// or a numeric string and falls back to 0. Returns `None` when the
    /// record has no usable `name` — that is what guards reads against
    /// corrupted or structurally unrelated entries under the cart key.
    pub fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let name = fields.get("name")?.as_str()?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: fields.get("id").and_then(coerce_id),
            name: name.to_string(),
            price: fields.get("price").map(coerce_price).unwrap_or(0.0),
            description: field_string(fields.get("description")),
            image_ref: field_string(fields.get("imageRef")),
            quantity: fields.get("quantity").map(coerce_quantity).unwrap_or(1),
        })
    }
}

fn field_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Identifiers may be stored as strings or numbers.
fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Prices may be stored as numbers or numeric strings; anything else is 0.
fn coerce_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Quantities must be positive integers; anything else is 1.
fn coerce_quantity(value: &Value) -> i64 {
    value.as_i64().filter(|q| *q >= 1).unwrap_or(1)
}
