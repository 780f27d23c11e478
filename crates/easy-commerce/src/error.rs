//! Commerce error types.

use easy_cache::CacheError;
use thiserror::Error;

/// Errors that can occur while reading or writing the persisted cart.
///
/// These only surface through the `try_*` methods of
/// [`CartStore`](crate::CartStore); the click-path methods recover from
/// them and log instead.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The persisted slot does not hold a JSON array.
    #[error("Corrupt cart in slot {key}: {reason}")]
    CorruptCart { key: String, reason: String },

    /// The key-value store rejected a read or write.
    #[error("Cart storage error: {0}")]
    Storage(CacheError),
}

impl From<CacheError> for CommerceError {
    fn from(e: CacheError) -> Self {
        CommerceError::Storage(e)
    }
}
