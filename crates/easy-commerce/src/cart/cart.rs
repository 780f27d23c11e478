//! Cart type with merge-on-add semantics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::LineItem;
use crate::ids::ProductId;

/// One element of the persisted cart array.
///
/// Anything that does not parse as a [`LineItem`] is kept verbatim so a
/// save never destroys data another script wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartEntry {
    /// A well-formed line item.
    Item(LineItem),
    /// An element this crate cannot interpret.
    Opaque(Value),
}

impl CartEntry {
    /// The line item, if this entry is one.
    pub fn as_item(&self) -> Option<&LineItem> {
        match self {
            CartEntry::Item(item) => Some(item),
            CartEntry::Opaque(_) => None,
        }
    }

    /// Product id of the entry.
    ///
    /// Opaque objects still carry an id when they have a string `id` key,
    /// even if some other field is malformed.
    pub fn id(&self) -> Option<&str> {
        match self {
            CartEntry::Item(item) => Some(item.id.as_str()),
            CartEntry::Opaque(Value::Object(fields)) => fields.get("id").and_then(Value::as_str),
            CartEntry::Opaque(_) => None,
        }
    }

    /// Units this entry contributes to the item count.
    pub fn quantity(&self) -> u64 {
        match self {
            CartEntry::Item(item) => u64::from(item.quantity),
            CartEntry::Opaque(Value::Object(fields)) => {
                fields.get("quantity").and_then(whole_quantity).unwrap_or(0)
            }
            CartEntry::Opaque(_) => 0,
        }
    }

    /// Bump the quantity by one in place and return the new value.
    ///
    /// An opaque object's `quantity` that is missing, null, or not a whole
    /// number counts as 0. Its other keys are left untouched.
    fn increment(&mut self) -> u32 {
        match self {
            CartEntry::Item(item) => {
                item.quantity = item.quantity.saturating_add(1);
                item.quantity
            }
            CartEntry::Opaque(Value::Object(fields)) => {
                let next = fields
                    .get("quantity")
                    .and_then(whole_quantity)
                    .unwrap_or(0)
                    .saturating_add(1);
                fields.insert("quantity".to_string(), Value::from(next));
                u32::try_from(next).unwrap_or(u32::MAX)
            }
            CartEntry::Opaque(_) => 0,
        }
    }
}

/// A JSON quantity as a non-negative whole number (`2` or `2.0`).
fn whole_quantity(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

/// Result of adding an item to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was new and was appended.
    Appended,
    /// The product was already present; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// Ordered, id-unique collection of line items.
///
/// Serializes as a bare JSON array. Order is the order in which products
/// were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw entries.
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        Self { entries }
    }

    /// Add a product.
    ///
    /// If any entry with the same id exists, opaque ones included, its
    /// quantity goes up by one and the incoming item is discarded, display
    /// fields included. Otherwise the item is appended with quantity 1.
    pub fn add(&mut self, item: LineItem) -> AddOutcome {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id() == Some(item.id.as_str()))
        {
            return AddOutcome::Incremented {
                quantity: existing.increment(),
            };
        }

        let mut item = item;
        item.quantity = super::INITIAL_QUANTITY;
        self.entries.push(CartEntry::Item(item));
        AddOutcome::Appended
    }

    /// Total item count (sum of quantities over every entry).
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(CartEntry::quantity).sum()
    }

    /// Iterate over well-formed line items in cart order.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.entries.iter().filter_map(CartEntry::as_item)
    }

    /// All entries, opaque ones included.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items().find(|i| &i.id == id)
    }

    /// Number of unique products.
    pub fn unique_item_count(&self) -> usize {
        self.items().count()
    }

    /// Check if the cart holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
