//! Persisted cart store.

use easy_cache::{Cache, CacheError, KvStore};

use crate::cart::{AddOutcome, Cart, CartEvents, LineItem, SubscriptionId};
use crate::error::CommerceError;

/// Slot the storefront has always used for the cart.
pub const DEFAULT_CART_KEY: &str = "easyTargetCart";

/// Owns the persisted cart slot and the "cart changed" broadcast.
///
/// The slot is the single source of truth: every operation re-reads it and
/// writes the whole cart back. Nothing is cached between calls.
///
/// The click-path methods (`load`, `save`, `add_item`) never fail. A corrupt
/// slot reads as an empty cart and a rejected write is logged, so cart
/// bookkeeping can never block the page.
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    events: CartEvents,
}

impl<S: KvStore> CartStore<S> {
    /// Create a store using [`DEFAULT_CART_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// Create a store using a custom slot name.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            events: CartEvents::new(),
        }
    }

    /// Slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the cart, reporting why it could not be read.
    ///
    /// An absent slot is an empty cart, not an error.
    pub fn try_load(&self) -> Result<Cart, CommerceError> {
        match self.cache.get::<Cart>(&self.key) {
            Ok(cart) => Ok(cart.unwrap_or_default()),
            Err(CacheError::Serialize(e)) => Err(CommerceError::CorruptCart {
                key: self.key.clone(),
                reason: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the cart, falling back to an empty one on any failure.
    pub fn load(&self) -> Cart {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart");
            Cart::new()
        })
    }

    /// Merge `item` into `cart` and return the result.
    ///
    /// See [`Cart::add`] for the merge rule.
    pub fn add(&self, mut cart: Cart, item: LineItem) -> Cart {
        let id = item.id.clone();
        match cart.add(item) {
            AddOutcome::Appended => tracing::debug!(product = %id, "cart item appended"),
            AddOutcome::Incremented { quantity } => {
                tracing::debug!(product = %id, quantity, "cart item incremented")
            }
        }
        cart
    }

    /// Overwrite the slot with `cart`, then notify observers.
    pub fn try_save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&self.key, cart)?;
        self.events.emit(cart);
        Ok(())
    }

    /// Overwrite the slot with `cart`, then notify observers.
    ///
    /// A failed write is logged and observers are not notified.
    pub fn save(&self, cart: &Cart) {
        if let Err(e) = self.try_save(cart) {
            tracing::warn!(key = %self.key, error = %e, "cart not saved");
        }
    }

    /// Total number of units in `cart`.
    pub fn count(&self, cart: &Cart) -> u64 {
        cart.item_count()
    }

    /// One full read-merge-write cycle. Returns the saved cart.
    pub fn add_item(&self, item: LineItem) -> Cart {
        let cart = self.add(self.load(), item);
        self.save(&cart);
        cart
    }

    /// Register a "cart changed" observer.
    pub fn subscribe(&self, observer: impl Fn(&Cart) + 'static) -> SubscriptionId {
        self.events.subscribe(observer)
    }

    /// Remove a "cart changed" observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Borrow the underlying key-value store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }
}
