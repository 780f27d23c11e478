//! String key-value slots with typed JSON access.
//!
//! The storefront persists everything in string slots shaped like browser
//! `localStorage`. This crate provides the [`KvStore`] abstraction, an
//! in-memory backend for hosts and tests, the `localStorage` backend for
//! wasm32, and [`Cache`], which layers JSON serialization on top.
//!
//! # Example
//!
//! ```rust
//! use easy_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("easyTargetCart", &Vec::<u32>::new()).unwrap();
//! let items: Option<Vec<u32>> = cache.get("easyTargetCart").unwrap();
//! assert_eq!(items, Some(vec![]));
//! ```

mod error;
mod kv;
#[cfg(target_arch = "wasm32")]
mod local;
mod store;

pub use error::CacheError;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore, MemoryStore};
}
