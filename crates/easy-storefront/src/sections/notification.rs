//! Mini cart notification.

use easy_commerce::LineItem;

use super::html_escape;

pub(super) const CLASS_NAME: &str = "mini-cart-notification";

pub(super) const WRAPPER_STYLE: &str = "position: fixed; top: 20px; right: 20px; \
background-color: #4CAF50; color: white; padding: 15px; border-radius: 5px; \
z-index: 999; box-shadow: 0 4px 8px rgba(0,0,0,0.1);";

/// Render the toast body shown after "add to cart".
pub fn render_mini_notification(item: &LineItem) -> String {
    format!(
        r#"<div class="notification-content">
    <p><strong>{}</strong> added to cart</p>
</div>"#,
        html_escape(item.display_name())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_notification() {
        let html = render_mini_notification(&LineItem::new("p1").with_name("Widget"));
        assert!(html.contains("<p><strong>Widget</strong> added to cart</p>"));
    }

    #[test]
    fn test_render_notification_escapes() {
        let html = render_mini_notification(&LineItem::new("p1").with_name("A & B"));
        assert!(html.contains("<strong>A &amp; B</strong>"));
    }
}
