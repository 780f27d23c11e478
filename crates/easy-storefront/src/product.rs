//! Product data read from the page around a clicked control.

use easy_commerce::{LineItem, ProductId};

/// Raw values found in a product container.
///
/// Values are kept exactly as read; [`ProductFields::into_line_item`]
/// decides what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    /// The container's `data-product-id` attribute.
    pub data_product_id: Option<String>,
    /// The container's element id.
    pub element_id: Option<String>,
    /// Text of the name element.
    pub name: Option<String>,
    /// Text of the price element.
    pub price: Option<String>,
    /// Source URL of the image element.
    pub image: Option<String>,
}

impl ProductFields {
    /// Build the line item to add.
    ///
    /// The id comes from `data-product-id`, or from the element id when the
    /// attribute is missing or empty. A container with neither gets the
    /// empty id. Name and price text are trimmed.
    pub fn into_line_item(self) -> LineItem {
        let id = non_empty(self.data_product_id)
            .or_else(|| non_empty(self.element_id))
            .unwrap_or_default();

        let mut item = LineItem::new(ProductId::new(id));
        item.name = self.name.map(|s| s.trim().to_string());
        item.price = self.price.map(|s| s.trim().to_string());
        item.image = self.image;
        item
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Something that can locate the product a click belongs to.
///
/// In the browser this walks up from the event target to the nearest
/// product container. Returns `None` when there is no container.
pub trait ProductSource {
    fn product_fields(&self) -> Option<ProductFields>;
}

impl ProductSource for ProductFields {
    fn product_fields(&self) -> Option<ProductFields> {
        Some(self.clone())
    }
}

impl<T: ProductSource> ProductSource for Option<T> {
    fn product_fields(&self) -> Option<ProductFields> {
        self.as_ref().and_then(ProductSource::product_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ProductFields {
        ProductFields {
            data_product_id: Some("p1".to_string()),
            element_id: Some("card-7".to_string()),
            name: Some("\n   Widget  ".to_string()),
            price: Some(" $9.99 ".to_string()),
            image: Some("https://shop.example/w.png".to_string()),
        }
    }

    #[test]
    fn test_data_attribute_wins() {
        let item = fields().into_line_item();
        assert_eq!(item.id.as_str(), "p1");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_text_is_trimmed() {
        let item = fields().into_line_item();
        assert_eq!(item.name.as_deref(), Some("Widget"));
        assert_eq!(item.price.as_deref(), Some("$9.99"));
        assert_eq!(item.image.as_deref(), Some("https://shop.example/w.png"));
    }

    #[test]
    fn test_falls_back_to_element_id() {
        let mut f = fields();
        f.data_product_id = Some(String::new());
        assert_eq!(f.clone().into_line_item().id.as_str(), "card-7");

        f.data_product_id = None;
        assert_eq!(f.into_line_item().id.as_str(), "card-7");
    }

    #[test]
    fn test_no_id_uses_empty_id() {
        let f = ProductFields {
            element_id: Some(String::new()),
            name: Some("Widget".to_string()),
            ..Default::default()
        };
        let item = f.into_line_item();
        assert_eq!(item.id.as_str(), "");
        assert_eq!(item.name.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let f = ProductFields {
            data_product_id: Some("p2".to_string()),
            ..Default::default()
        };
        let item = f.into_line_item();
        assert!(item.name.is_none());
        assert!(item.price.is_none());
        assert!(item.image.is_none());
    }

    #[test]
    fn test_missing_container() {
        let source: Option<ProductFields> = None;
        assert!(source.product_fields().is_none());
        assert!(Some(fields()).product_fields().is_some());
    }
}
