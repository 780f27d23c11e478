//! Browser `localStorage` backend.

use web_sys::Storage;

use crate::{CacheError, KvStore};

/// Key-value store backed by `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the page's local storage.
    ///
    /// Fails when there is no window or storage is disabled (private
    /// browsing modes, sandboxed iframes).
    pub fn open() -> Result<Self, CacheError> {
        let window = web_sys::window()
            .ok_or_else(|| CacheError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KvStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        // Quota errors land here.
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }
}
