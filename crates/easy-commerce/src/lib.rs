//! Cart domain types and the persisted cart store for the Easy Target
//! storefront.
//!
//! - **Cart**: ordered, id-unique line items with merge-on-add
//! - **CartStore**: load / add / save / count over a key-value slot
//! - **CartEvents**: synchronous "cart changed" observers
//!
//! # Example
//!
//! ```rust
//! use easy_cache::MemoryStore;
//! use easy_commerce::prelude::*;
//!
//! let store = CartStore::new(MemoryStore::new());
//! store.subscribe(|cart| println!("{} item(s)", cart.item_count()));
//!
//! let cart = store.add_item(LineItem::new("p1").with_name("Widget"));
//! assert_eq!(store.count(&cart), 1);
//! ```

pub mod cart;
pub mod error;
pub mod ids;

pub use cart::{
    AddOutcome, Cart, CartEntry, CartEvents, CartStore, LineItem, SubscriptionId,
    DEFAULT_CART_KEY,
};
pub use error::CommerceError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        AddOutcome, Cart, CartEntry, CartStore, LineItem, SubscriptionId, DEFAULT_CART_KEY,
    };
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
}
