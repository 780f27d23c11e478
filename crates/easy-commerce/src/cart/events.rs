//! "Cart changed" observer registry.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::cart::Cart;

/// Handle returned by [`CartEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&Cart)>;

/// Synchronous broadcast of the full cart after every save.
///
/// Observers run in registration order. An observer may subscribe or
/// unsubscribe while being notified; the change applies from the next
/// broadcast.
#[derive(Default)]
pub struct CartEvents {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
}

impl CartEvents {
    /// Create a registry with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn subscribe(&self, observer: impl Fn(&Cart) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let len_before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() < len_before
    }

    /// Notify every observer with `cart`.
    pub fn emit(&self, cart: &Cart) {
        let snapshot: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, o)| Rc::clone(o))
            .collect();
        for observer in snapshot {
            observer(cart);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Check if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }
}

impl fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEvents")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;

    #[test]
    fn test_emit_in_registration_order() {
        let events = CartEvents::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["badge", "mini-cart", "analytics"] {
            let log = Rc::clone(&log);
            events.subscribe(move |_| log.borrow_mut().push(name));
        }
        events.emit(&Cart::new());

        assert_eq!(*log.borrow(), vec!["badge", "mini-cart", "analytics"]);
    }

    #[test]
    fn test_payload_is_full_cart() {
        let events = CartEvents::new();
        let seen = Rc::new(Cell::new(0));
        let seen_in = Rc::clone(&seen);
        events.subscribe(move |cart| seen_in.set(cart.item_count()));

        let mut cart = Cart::new();
        cart.add(LineItem::new("p1"));
        cart.add(LineItem::new("p1"));
        events.emit(&cart);

        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let events = CartEvents::new();
        let calls = Rc::new(Cell::new(0));
        let calls_in = Rc::clone(&calls);
        let id = events.subscribe(move |_| calls_in.set(calls_in.get() + 1));

        events.emit(&Cart::new());
        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit(&Cart::new());

        assert_eq!(calls.get(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_subscribe_during_emit() {
        let events = Rc::new(CartEvents::new());
        let inner = Rc::clone(&events);
        events.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        events.emit(&Cart::new());
        assert_eq!(events.len(), 2);
    }
}
