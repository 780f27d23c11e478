//! Storefront error types.

use easy_cache::CacheError;
use thiserror::Error;

/// Errors raised while setting the storefront up.
///
/// Click handling itself never fails; these only come out of configuration
/// and page binding.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The cart slot could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    /// The page is missing something the binding needs.
    #[cfg(target_arch = "wasm32")]
    #[error("DOM error: {0}")]
    Dom(String),
}
