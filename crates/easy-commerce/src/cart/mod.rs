//! Shopping cart module.
//!
//! Contains the cart and line item types, the "cart changed" broadcast, and
//! the store that persists the cart in a key-value slot.

mod cart;
mod events;
mod line_item;
mod store;

pub use cart::{AddOutcome, Cart, CartEntry};
pub use events::{CartEvents, SubscriptionId};
pub use line_item::{LineItem, INITIAL_QUANTITY};
pub use store::{CartStore, DEFAULT_CART_KEY};
