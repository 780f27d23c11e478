//! Line item type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::ProductId;

/// Quantity of a freshly added line item.
pub const INITIAL_QUANTITY: u32 = 1;

fn default_quantity() -> u32 {
    INITIAL_QUANTITY
}

/// One product entry in the cart.
///
/// Display fields are copied from the page when the product is first added
/// and never refreshed afterwards. Absent fields are omitted from the
/// persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display-formatted price, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Number of units.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Keys written by other code that this crate does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Create a line item with quantity 1 and no display fields.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            price: None,
            image: None,
            quantity: INITIAL_QUANTITY,
            extra: Map::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the display price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Name for display, empty when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Price for display, empty when absent.
    pub fn display_price(&self) -> &str {
        self.price.as_deref().unwrap_or_default()
    }

    /// Image URL for display, empty when absent.
    pub fn display_image(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_item() {
        let item = LineItem::new("p1").with_name("Widget").with_price("$9.99");
        assert_eq!(item.id.as_str(), "p1");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.display_name(), "Widget");
        assert_eq!(item.display_image(), "");
    }

    #[test]
    fn test_serialized_key_order_and_shape() {
        let item = LineItem::new("p1")
            .with_name("Widget")
            .with_price("$9.99")
            .with_image("/w.png");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"p1","name":"Widget","price":"$9.99","image":"/w.png","quantity":1}"#
        );
    }

    #[test]
    fn test_absent_fields_omitted() {
        let json = serde_json::to_string(&LineItem::new("p1")).unwrap();
        assert_eq!(json, r#"{"id":"p1","quantity":1}"#);
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let item: LineItem = serde_json::from_str(r#"{"id":"p1"}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.name.is_none());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let raw = r#"{"id":"p1","quantity":3,"color":"red"}"#;
        let item: LineItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.extra.get("color"), Some(&Value::from("red")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["color"], "red");
        assert_eq!(back["quantity"], 3);
    }

    #[test]
    fn test_non_string_id_rejected() {
        let result: Result<LineItem, _> = serde_json::from_str(r#"{"id":5,"quantity":1}"#);
        assert!(result.is_err());
    }
}
