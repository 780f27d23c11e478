//! Click handling for "buy now" and "add to cart" controls.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use easy_cache::KvStore;
use easy_commerce::{CartStore, LineItem};

use crate::config::StorefrontConfig;
use crate::overlay::OverlayId;
use crate::product::ProductSource;
use crate::scheduler::{Scheduler, TaskId};
use crate::sections::{CounterBadge, Overlay};
use crate::view::View;

/// What a handled click did.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// The item as read from the page.
    pub item: LineItem,
    /// Overlay shown in response.
    pub overlay: OverlayId,
    /// Units in the cart after the click.
    pub cart_count: u64,
}

type Dismissals = Rc<RefCell<HashMap<OverlayId, TaskId>>>;

/// Page controller tying the cart store to a view and a scheduler.
///
/// Every click runs one synchronous read-merge-write cycle on the cart and
/// then schedules its UI cleanup. A click whose control has no product
/// container does nothing at all.
pub struct Storefront<S, V, C> {
    config: StorefrontConfig,
    cart: CartStore<S>,
    view: Rc<V>,
    scheduler: C,
    dismissals: Dismissals,
}

impl<S, V, C> Storefront<S, V, C>
where
    S: KvStore,
    V: View + 'static,
    C: Scheduler,
{
    /// Create a storefront. The cart lives in `config.storage_key`.
    pub fn new(config: StorefrontConfig, store: S, view: V, scheduler: C) -> Self {
        let cart = CartStore::with_key(store, config.storage_key.clone());
        Self {
            config,
            cart,
            view: Rc::new(view),
            scheduler,
            dismissals: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Page-load setup: draw the counter from the persisted cart.
    pub fn init(&self) -> u64 {
        self.refresh_counter()
    }

    /// Handle a "buy now" click.
    ///
    /// Adds the product, shows the confirmation modal, and navigates to
    /// checkout after the redirect delay.
    pub fn buy_now(&self, source: &impl ProductSource) -> Option<Interaction> {
        let item = Self::extract(source, "buy now")?;
        let cart = self.cart.add_item(item.clone());

        let overlay = self.view.show_overlay(Overlay::confirmation(&item));
        self.dismiss_after(overlay, self.config.modal_dismiss());

        let view = Rc::clone(&self.view);
        let path = self.config.checkout_path.clone();
        self.scheduler.schedule(
            self.config.redirect_delay(),
            Box::new(move || {
                tracing::info!(path = %path, "redirecting to checkout");
                view.navigate(&path);
            }),
        );

        Some(Interaction {
            item,
            overlay,
            cart_count: self.cart.count(&cart),
        })
    }

    /// Handle an "add to cart" click.
    ///
    /// Adds the product, shows the mini notification, and redraws the
    /// counter straight away.
    pub fn add_to_cart(&self, source: &impl ProductSource) -> Option<Interaction> {
        let item = Self::extract(source, "add to cart")?;
        self.cart.add_item(item.clone());

        let overlay = self.view.show_overlay(Overlay::notification(&item));
        self.dismiss_after(overlay, self.config.notification_dismiss());

        let cart_count = self.refresh_counter();
        Some(Interaction {
            item,
            overlay,
            cart_count,
        })
    }

    /// Close an overlay on user request.
    ///
    /// Returns `false` if it was already gone. Its pending auto-dismiss is
    /// cancelled either way.
    pub fn close(&self, overlay: OverlayId) -> bool {
        if let Some(task) = self.dismissals.borrow_mut().remove(&overlay) {
            self.scheduler.cancel(task);
        }
        self.view.remove_overlay(overlay)
    }

    /// Redraw the counter from the persisted cart and return the count.
    pub fn refresh_counter(&self) -> u64 {
        let count = self.cart.count(&self.cart.load());
        self.view.update_counter(CounterBadge::new(count));
        count
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    fn extract(source: &impl ProductSource, action: &str) -> Option<LineItem> {
        let Some(fields) = source.product_fields() else {
            tracing::debug!(action, "click ignored: no product container");
            return None;
        };
        let item = fields.into_line_item();
        if item.id.as_str().is_empty() {
            tracing::debug!(action, "product container has no id");
        }
        Some(item)
    }

    fn dismiss_after(&self, overlay: OverlayId, delay: Duration) {
        let view = Rc::clone(&self.view);
        let dismissals = Rc::clone(&self.dismissals);
        let task = self.scheduler.schedule(
            delay,
            Box::new(move || {
                dismissals.borrow_mut().remove(&overlay);
                if !view.remove_overlay(overlay) {
                    tracing::trace!(%overlay, "overlay already closed");
                }
            }),
        );
        self.dismissals.borrow_mut().insert(overlay, task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayKind;
    use crate::product::ProductFields;
    use crate::scheduler::ManualScheduler;
    use crate::view::MemoryView;
    use easy_cache::MemoryStore;

    type TestStorefront = Storefront<MemoryStore, MemoryView, ManualScheduler>;

    fn storefront() -> TestStorefront {
        Storefront::new(
            StorefrontConfig::default(),
            MemoryStore::new(),
            MemoryView::new(),
            ManualScheduler::new(),
        )
    }

    fn card(id: &str) -> ProductFields {
        ProductFields {
            data_product_id: Some(id.to_string()),
            name: Some("Widget".to_string()),
            price: Some("$9.99".to_string()),
            image: Some("/w.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_draws_counter() {
        let store = MemoryStore::with_slot("easyTargetCart", r#"[{"id":"p1","quantity":4}]"#);
        let sf = Storefront::new(
            StorefrontConfig::default(),
            store,
            MemoryView::new(),
            ManualScheduler::new(),
        );
        assert_eq!(sf.init(), 4);
        assert_eq!(sf.view().counter(), Some(CounterBadge::new(4)));
    }

    #[test]
    fn test_add_to_cart() {
        let sf = storefront();
        let result = sf.add_to_cart(&card("p1")).unwrap();

        assert_eq!(result.cart_count, 1);
        assert_eq!(sf.view().counter(), Some(CounterBadge::new(1)));
        assert!(sf.view().is_shown(result.overlay));
        assert_eq!(sf.view().shown(OverlayKind::MiniNotification).len(), 1);

        sf.scheduler().advance(Duration::from_millis(3000));
        assert!(!sf.view().is_shown(result.overlay));
    }

    #[test]
    fn test_buy_now_redirects_after_delay() {
        let sf = storefront();
        let result = sf.buy_now(&card("p1")).unwrap();
        assert_eq!(result.cart_count, 1);
        assert!(sf.view().is_shown(result.overlay));

        sf.scheduler().advance(Duration::from_millis(999));
        assert!(sf.view().navigations().is_empty());
        sf.scheduler().advance(Duration::from_millis(1));
        assert_eq!(sf.view().navigations(), vec!["/checkout".to_string()]);
    }

    #[test]
    fn test_buy_now_does_not_touch_counter() {
        let sf = storefront();
        sf.buy_now(&card("p1"));
        assert_eq!(sf.view().counter(), None);
    }

    #[test]
    fn test_close_cancels_auto_dismiss() {
        let sf = storefront();
        let result = sf.buy_now(&card("p1")).unwrap();
        assert_eq!(sf.scheduler().pending(), 2);

        assert!(sf.close(result.overlay));
        assert!(!sf.close(result.overlay));
        assert_eq!(sf.scheduler().pending(), 1);

        sf.scheduler().advance(Duration::from_secs(5));
        assert_eq!(sf.view().overlay_count(), 0);
    }

    #[test]
    fn test_missing_container_is_noop() {
        let sf = storefront();
        let none: Option<ProductFields> = None;

        assert!(sf.buy_now(&none).is_none());
        assert!(sf.add_to_cart(&none).is_none());
        assert!(sf.cart().store().is_empty());
        assert_eq!(sf.view().overlay_count(), 0);
        assert_eq!(sf.scheduler().pending(), 0);
    }

    #[test]
    fn test_missing_id_still_checks_out() {
        let sf = storefront();
        let mut fields = card("p1");
        fields.data_product_id = None;

        let result = sf.buy_now(&fields).unwrap();
        assert_eq!(result.item.id.as_str(), "");
        assert!(sf.view().is_shown(result.overlay));
        assert_eq!(sf.add_to_cart(&fields).unwrap().cart_count, 2);
        assert_eq!(sf.cart().load().unique_item_count(), 1);

        sf.scheduler().advance(Duration::from_secs(1));
        assert_eq!(sf.view().navigations(), vec!["/checkout".to_string()]);
    }
}
