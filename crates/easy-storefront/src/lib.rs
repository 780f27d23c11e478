//! Buy-now and add-to-cart click handling for the Easy Target storefront.
//!
//! This crate provides:
//! - `StorefrontConfig` - Slot name, checkout route, delays, and selectors
//! - `Storefront` - Click controller over a cart store, a view, and a scheduler
//! - `View` / `MemoryView` - Rendering surface and its headless recorder
//! - `Scheduler` / `ManualScheduler` - Cancellable one-shot tasks
//! - `sections` - Markup for the confirmation modal, mini notification, and
//!   counter badge
//!
//! On wasm32 the `dom` module binds all of it to the live page.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use easy_cache::MemoryStore;
//! use easy_storefront::prelude::*;
//!
//! let storefront = Storefront::new(
//!     StorefrontConfig::default(),
//!     MemoryStore::new(),
//!     MemoryView::new(),
//!     ManualScheduler::new(),
//! );
//!
//! let card = ProductFields {
//!     data_product_id: Some("p1".to_string()),
//!     name: Some("Widget".to_string()),
//!     ..Default::default()
//! };
//! storefront.buy_now(&card);
//!
//! storefront.scheduler().advance(Duration::from_secs(1));
//! assert_eq!(storefront.view().navigations(), vec!["/checkout".to_string()]);
//! ```

pub mod config;
pub mod error;
pub mod overlay;
pub mod product;
pub mod scheduler;
pub mod sections;
pub mod storefront;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::{Selectors, StorefrontConfig};
pub use error::StorefrontError;
pub use overlay::{OverlayId, OverlayKind, Overlays};
pub use product::{ProductFields, ProductSource};
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskId, TimerHandles};
pub use sections::{CounterBadge, Overlay};
pub use storefront::{Interaction, Storefront};
pub use view::{MemoryView, View};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::overlay::{OverlayId, OverlayKind};
    pub use crate::product::{ProductFields, ProductSource};
    pub use crate::scheduler::{ManualScheduler, Scheduler};
    pub use crate::storefront::{Interaction, Storefront};
    pub use crate::view::{MemoryView, View};
}
