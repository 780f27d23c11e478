//! Browser binding: `localStorage`, `document.body`, `setTimeout`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use easy_cache::LocalStorage;
use easy_commerce::Cart;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, EventTarget, HtmlElement,
    HtmlImageElement, Window,
};

use crate::config::{Selectors, StorefrontConfig};
use crate::error::StorefrontError;
use crate::overlay::{OverlayId, Overlays};
use crate::product::{ProductFields, ProductSource};
use crate::scheduler::{Scheduler, Task, TaskId, TimerHandles};
use crate::sections::{CounterBadge, Overlay, CLOSE_CLASS};
use crate::storefront::Storefront;
use crate::view::View;

/// Event dispatched on `document` after every cart save.
pub const CART_UPDATED_EVENT: &str = "cartUpdated";

const OVERLAY_ID_ATTR: &str = "data-overlay-id";

type PageStorefront = Storefront<LocalStorage, DomView, DomScheduler>;

/// Scheduler backed by `window.setTimeout`.
///
/// Keeps the browser handle of every timer that has not fired yet, so a
/// cancel after the task ran reports `false`.
pub struct DomScheduler {
    window: Window,
    timers: Rc<TimerHandles<i32>>,
}

impl DomScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            timers: Rc::new(TimerHandles::new()),
        }
    }
}

impl Scheduler for DomScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskId {
        let id = self.timers.next_id();
        let timers = Rc::clone(&self.timers);
        let callback = Closure::once_into_js(move || {
            timers.disarm(id);
            task();
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => self.timers.arm(id, handle),
            Err(e) => tracing::warn!(error = ?e, "setTimeout failed"),
        }
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let Some(handle) = self.timers.disarm(id) else {
            return false;
        };
        self.window.clear_timeout_with_handle(handle);
        true
    }
}

/// View that draws into the live document.
pub struct DomView {
    document: Document,
    window: Window,
    counter_selector: String,
    overlays: RefCell<Overlays<Option<Element>>>,
}

impl DomView {
    pub fn new(
        window: Window,
        counter_selector: impl Into<String>,
    ) -> Result<Self, StorefrontError> {
        let document = window
            .document()
            .ok_or_else(|| StorefrontError::Dom("no document".to_string()))?;
        Ok(Self {
            document,
            window,
            counter_selector: counter_selector.into(),
            overlays: RefCell::new(Overlays::new()),
        })
    }

    fn build(&self, overlay: &Overlay) -> Result<Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(overlay.class_name);
        element.set_attribute("style", overlay.style)?;
        element.set_inner_html(&overlay.body);
        Ok(element)
    }
}

impl View for DomView {
    fn show_overlay(&self, overlay: Overlay) -> OverlayId {
        let element = match self.build(&overlay) {
            Ok(element) => Some(element),
            Err(e) => {
                tracing::warn!(kind = ?overlay.kind, error = ?e, "could not build overlay");
                None
            }
        };
        let id = self.overlays.borrow_mut().open(overlay.kind, element.clone());

        if let Some(element) = element {
            if let Err(e) = element.set_attribute(OVERLAY_ID_ATTR, &id.to_string()) {
                tracing::warn!(%id, error = ?e, "could not tag overlay");
            }
            match self.document.body() {
                Some(body) => {
                    if let Err(e) = body.append_child(&element) {
                        tracing::warn!(%id, error = ?e, "could not attach overlay");
                    }
                }
                None => tracing::warn!(%id, "no document body for overlay"),
            }
        }
        id
    }

    fn remove_overlay(&self, id: OverlayId) -> bool {
        match self.overlays.borrow_mut().dismiss(id) {
            Some(element) => {
                if let Some(element) = element {
                    element.remove();
                }
                true
            }
            None => false,
        }
    }

    fn update_counter(&self, badge: CounterBadge) {
        let Ok(Some(element)) = self.document.query_selector(&self.counter_selector) else {
            return;
        };
        element.set_text_content(Some(&badge.text()));
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property("display", badge.display()) {
                tracing::warn!(error = ?e, "could not style cart counter");
            }
        }
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            tracing::warn!(path, error = ?e, "navigation failed");
        }
    }
}

/// Product source rooted at a clicked element.
pub struct ElementSource<'a> {
    target: Option<Element>,
    selectors: &'a Selectors,
}

impl<'a> ElementSource<'a> {
    pub fn from_event(event: &Event, selectors: &'a Selectors) -> Self {
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        Self { target, selectors }
    }
}

impl ProductSource for ElementSource<'_> {
    fn product_fields(&self) -> Option<ProductFields> {
        let container = self
            .target
            .as_ref()?
            .closest(&self.selectors.product_container)
            .ok()
            .flatten()?;

        let text_of = |selector: &str| {
            container
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.text_content())
        };
        let image = container
            .query_selector(&self.selectors.product_image)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            .map(|img| img.src());
        let element_id = Some(container.id()).filter(|id| !id.is_empty());

        Some(ProductFields {
            data_product_id: container.get_attribute("data-product-id"),
            element_id,
            name: text_of(&self.selectors.product_name),
            price: text_of(&self.selectors.product_price),
            image,
        })
    }
}

fn dispatch_cart_updated(document: &Document, cart: &Cart) {
    let detail = serde_json::to_string(cart)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL);
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(CART_UPDATED_EVENT, &init) {
        Ok(event) => {
            if let Err(e) = document.dispatch_event(&event) {
                tracing::warn!(error = ?e, "cartUpdated dispatch failed");
            }
        }
        Err(e) => tracing::warn!(error = ?e, "could not build cartUpdated event"),
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!(event, error = ?e, "could not add listener");
    }
    // Listeners live as long as the page.
    closure.forget();
}

fn bind_controls<F>(
    document: &Document,
    selector: &str,
    storefront: &Rc<PageStorefront>,
    action: F,
) where
    F: Fn(&PageStorefront, &ElementSource<'_>) + Clone + 'static,
{
    let Ok(controls) = document.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid control selector");
        return;
    };
    for index in 0..controls.length() {
        let Some(control) = controls.item(index) else {
            continue;
        };
        let storefront = Rc::clone(storefront);
        let action = action.clone();
        listen(&control, "click", move |event: Event| {
            event.prevent_default();
            let selectors = storefront.config().selectors.clone();
            let source = ElementSource::from_event(&event, &selectors);
            action(storefront.as_ref(), &source);
        });
    }
}

/// Wire the page: controls, close buttons, the `cartUpdated` event, and the
/// initial counter.
pub fn bind(config: StorefrontConfig) -> Result<(), StorefrontError> {
    config.validate()?;
    let window = web_sys::window().ok_or_else(|| StorefrontError::Dom("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| StorefrontError::Dom("no document".to_string()))?;

    let store = LocalStorage::open()?;
    let view = DomView::new(window.clone(), config.selectors.cart_counter.clone())?;
    let buy_now = config.selectors.buy_now.clone();
    let add_to_cart = config.selectors.add_to_cart.clone();
    let storefront = Rc::new(Storefront::new(config, store, view, DomScheduler::new(window)));

    let events_target = document.clone();
    storefront
        .cart()
        .subscribe(move |cart| dispatch_cart_updated(&events_target, cart));

    bind_controls(&document, &buy_now, &storefront, |sf, source| {
        sf.buy_now(source);
    });
    bind_controls(&document, &add_to_cart, &storefront, |sf, source| {
        sf.add_to_cart(source);
    });

    let close_storefront = Rc::clone(&storefront);
    let close_selector = format!(".{}", CLOSE_CLASS);
    listen(&document, "click", move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if !matches!(target.closest(&close_selector), Ok(Some(_))) {
            return;
        }
        let overlay = target
            .closest(&format!("[{}]", OVERLAY_ID_ATTR))
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute(OVERLAY_ID_ATTR))
            .and_then(|raw| raw.parse::<u64>().ok());
        if let Some(raw) = overlay {
            close_storefront.close(OverlayId::new(raw));
        }
    });

    let count = storefront.init();
    tracing::debug!(count, "storefront bound");
    Ok(())
}

/// Module entry point: bind with default configuration.
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = bind(StorefrontConfig::default()) {
        tracing::warn!(error = %e, "storefront not bound");
    }
}
