//! Rendering surface the storefront drives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::overlay::{OverlayId, OverlayKind, Overlays};
use crate::sections::{CounterBadge, Overlay};

/// Page surface: overlays, the counter badge, and navigation.
///
/// Methods take `&self` because deferred tasks hold the view while click
/// handlers keep using it.
pub trait View {
    /// Attach an overlay and return its id.
    fn show_overlay(&self, overlay: Overlay) -> OverlayId;

    /// Remove an overlay if it is still shown. Returns `false` (and does
    /// nothing) when it is already gone.
    fn remove_overlay(&self, id: OverlayId) -> bool;

    /// Redraw the cart counter badge.
    fn update_counter(&self, badge: CounterBadge);

    /// Leave the page for `path`.
    fn navigate(&self, path: &str);
}

impl<V: View + ?Sized> View for Rc<V> {
    fn show_overlay(&self, overlay: Overlay) -> OverlayId {
        (**self).show_overlay(overlay)
    }

    fn remove_overlay(&self, id: OverlayId) -> bool {
        (**self).remove_overlay(id)
    }

    fn update_counter(&self, badge: CounterBadge) {
        (**self).update_counter(badge)
    }

    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }
}

/// Headless view that records what would be on screen.
#[derive(Debug, Default)]
pub struct MemoryView {
    overlays: RefCell<Overlays<Overlay>>,
    counter: Cell<Option<CounterBadge>>,
    navigations: RefCell<Vec<String>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self, id: OverlayId) -> bool {
        self.overlays.borrow().is_shown(id)
    }

    /// Overlays of one kind currently on screen, oldest first.
    pub fn shown(&self, kind: OverlayKind) -> Vec<Overlay> {
        self.overlays
            .borrow()
            .of_kind(kind)
            .map(|(_, overlay)| overlay.clone())
            .collect()
    }

    /// Number of overlays on screen.
    pub fn overlay_count(&self) -> usize {
        self.overlays.borrow().len()
    }

    /// Last badge drawn, `None` if never drawn.
    pub fn counter(&self) -> Option<CounterBadge> {
        self.counter.get()
    }

    /// Every path navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl View for MemoryView {
    fn show_overlay(&self, overlay: Overlay) -> OverlayId {
        let kind = overlay.kind;
        self.overlays.borrow_mut().open(kind, overlay)
    }

    fn remove_overlay(&self, id: OverlayId) -> bool {
        self.overlays.borrow_mut().dismiss(id).is_some()
    }

    fn update_counter(&self, badge: CounterBadge) {
        self.counter.set(Some(badge));
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easy_commerce::LineItem;

    #[test]
    fn test_memory_view_overlays() {
        let view = MemoryView::new();
        let item = LineItem::new("p1").with_name("Widget");
        let modal = view.show_overlay(Overlay::confirmation(&item));
        let toast = view.show_overlay(Overlay::notification(&item));

        assert_eq!(view.overlay_count(), 2);
        assert_eq!(view.shown(OverlayKind::ConfirmationModal).len(), 1);

        assert!(view.remove_overlay(modal));
        assert!(!view.remove_overlay(modal));
        assert!(view.is_shown(toast));
        assert!(!view.is_shown(modal));
    }

    #[test]
    fn test_memory_view_counter_and_navigation() {
        let view = Rc::new(MemoryView::new());
        assert_eq!(view.counter(), None);

        view.update_counter(CounterBadge::new(2));
        view.navigate("/checkout");

        assert_eq!(view.counter(), Some(CounterBadge::new(2)));
        assert_eq!(view.navigations(), vec!["/checkout".to_string()]);
    }
}
