//! Presentation sections: markup for the transient overlays and the cart
//! counter badge.

mod badge;
mod modal;
mod notification;

pub use badge::CounterBadge;
pub use modal::{render_confirmation_modal, CLOSE_CLASS};
pub use notification::render_mini_notification;

use easy_commerce::LineItem;

use crate::overlay::OverlayKind;

/// An overlay ready to be attached to the page.
///
/// The view creates one wrapper element with `class_name` and `style` and
/// sets `body` as its inner HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub class_name: &'static str,
    pub style: &'static str,
    pub body: String,
}

impl Overlay {
    /// "Item Added to Cart" modal for a buy-now click.
    pub fn confirmation(item: &LineItem) -> Self {
        Self {
            kind: OverlayKind::ConfirmationModal,
            class_name: modal::CLASS_NAME,
            style: modal::WRAPPER_STYLE,
            body: render_confirmation_modal(item),
        }
    }

    /// Corner toast for an add-to-cart click.
    pub fn notification(item: &LineItem) -> Self {
        Self {
            kind: OverlayKind::MiniNotification,
            class_name: notification::CLASS_NAME,
            style: notification::WRAPPER_STYLE,
            body: render_mini_notification(item),
        }
    }

    /// Complete markup including the wrapper element.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{}" style="{}">{}</div>"#,
            self.class_name, self.style, self.body
        )
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom & Jerry"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_overlay_kinds() {
        let item = LineItem::new("p1").with_name("Widget");
        assert_eq!(Overlay::confirmation(&item).kind, OverlayKind::ConfirmationModal);
        assert_eq!(Overlay::notification(&item).kind, OverlayKind::MiniNotification);
    }

    #[test]
    fn test_to_html_wraps_body() {
        let overlay = Overlay::notification(&LineItem::new("p1").with_name("Widget"));
        let html = overlay.to_html();
        assert!(html.starts_with(r#"<div class="mini-cart-notification" style="position: fixed;"#));
        assert!(html.contains("<strong>Widget</strong> added to cart"));
        assert!(html.ends_with("</div>"));
    }
}
