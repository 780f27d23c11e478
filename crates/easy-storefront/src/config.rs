//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use easy_commerce::DEFAULT_CART_KEY;
use serde::{Deserialize, Serialize};

use crate::error::StorefrontError;

/// Storefront configuration.
///
/// Every field has a default matching the page script this crate replaces,
/// so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Key-value slot holding the cart.
    pub storage_key: String,

    /// Route opened after "buy now".
    pub checkout_path: String,

    /// Delay before navigating to checkout, in milliseconds.
    pub redirect_delay_ms: u64,

    /// Confirmation modal lifetime, in milliseconds.
    pub modal_dismiss_ms: u64,

    /// Mini notification lifetime, in milliseconds.
    pub notification_dismiss_ms: u64,

    /// CSS selectors for the page markup.
    pub selectors: Selectors,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            checkout_path: "/checkout".to_string(),
            redirect_delay_ms: 1000,
            modal_dismiss_ms: 3000,
            notification_dismiss_ms: 3000,
            selectors: Selectors::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would break the click flow.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.storage_key.is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.checkout_path.is_empty() {
            return Err(StorefrontError::InvalidConfig(
                "checkout_path must not be empty".to_string(),
            ));
        }
        for (name, selector) in self.selectors.named() {
            if selector.trim().is_empty() {
                return Err(StorefrontError::InvalidConfig(format!(
                    "selectors.{} must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn modal_dismiss(&self) -> Duration {
        Duration::from_millis(self.modal_dismiss_ms)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }
}

/// CSS selectors used to find controls and product data on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// "Buy now" controls.
    pub buy_now: String,
    /// "Add to cart" controls.
    pub add_to_cart: String,
    /// Enclosing product container, searched upward from the control.
    pub product_container: String,
    /// Product name, searched inside the container.
    pub product_name: String,
    /// Product price, searched inside the container.
    pub product_price: String,
    /// Product image, searched inside the container.
    pub product_image: String,
    /// Cart counter badge.
    pub cart_counter: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            buy_now: r#".buy-now, [data-action="buy-now"]"#.to_string(),
            add_to_cart: r#".add-to-cart, [data-action="add-to-cart"], .cart-icon"#.to_string(),
            product_container: ".product-item, .product-card, article".to_string(),
            product_name: ".product-name, h3, h4".to_string(),
            product_price: ".price, .product-price".to_string(),
            product_image: "img".to_string(),
            cart_counter: ".cart-count".to_string(),
        }
    }
}

impl Selectors {
    fn named(&self) -> [(&'static str, &str); 7] {
        [
            ("buy_now", self.buy_now.as_str()),
            ("add_to_cart", self.add_to_cart.as_str()),
            ("product_container", self.product_container.as_str()),
            ("product_name", self.product_name.as_str()),
            ("product_price", self.product_price.as_str()),
            ("product_image", self.product_image.as_str()),
            ("cart_counter", self.cart_counter.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.storage_key, "easyTargetCart");
        assert_eq!(config.checkout_path, "/checkout");
        assert_eq!(config.redirect_delay(), Duration::from_secs(1));
        assert_eq!(config.modal_dismiss(), Duration::from_secs(3));
        assert_eq!(config.notification_dismiss(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = StorefrontConfig::from_toml_str(
            r##"
checkout_path = "/cart/checkout"
redirect_delay_ms = 250

[selectors]
cart_counter = "#badge"
"##,
        )
        .unwrap();

        assert_eq!(config.checkout_path, "/cart/checkout");
        assert_eq!(config.redirect_delay_ms, 250);
        assert_eq!(config.selectors.cart_counter, "#badge");
        assert_eq!(config.selectors.product_image, "img");
        assert_eq!(config.storage_key, "easyTargetCart");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(StorefrontConfig::from_toml_str(r#"storage_key = """#).is_err());
        assert!(StorefrontConfig::from_toml_str("[selectors]\nbuy_now = \"  \"").is_err());
        assert!(StorefrontConfig::from_toml_str("redirect_delay_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "modal_dismiss_ms = 5000").unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.modal_dismiss_ms, 5000);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"storage_key": "cartV2"}}"#).unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.storage_key, "cartV2");
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load("/nonexistent/storefront.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
