//! Purchase confirmation modal.

use easy_commerce::LineItem;

use super::html_escape;

pub(super) const CLASS_NAME: &str = "purchase-modal";

pub(super) const WRAPPER_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; \
height: 100%; background-color: rgba(0,0,0,0.7); z-index: 1000; display: flex; \
justify-content: center; align-items: center;";

/// Class of the control that closes the modal.
pub const CLOSE_CLASS: &str = "close-modal";

/// Render the modal body shown after "buy now".
pub fn render_confirmation_modal(item: &LineItem) -> String {
    let name = html_escape(item.display_name());

    format!(
        r#"<div class="modal-content" style="background-color: #fff; padding: 20px; border-radius: 5px; max-width: 400px; width: 90%;">
    <span class="{close}">&times;</span>
    <h3>Item Added to Cart</h3>
    <div class="product-info" style="display: flex; align-items: center; margin: 15px 0;">
        <img src="{image}" alt="{name}" width="80">
        <div>
            <p>{name}</p>
            <p>{price}</p>
        </div>
    </div>
    <p>Redirecting to checkout...</p>
</div>"#,
        close = CLOSE_CLASS,
        image = html_escape(item.display_image()),
        name = name,
        price = html_escape(item.display_price()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_modal() {
        let item = LineItem::new("p1")
            .with_name("Widget")
            .with_price("$9.99")
            .with_image("/w.png");
        let html = render_confirmation_modal(&item);

        assert!(html.contains("<h3>Item Added to Cart</h3>"));
        assert!(html.contains(r#"<img src="/w.png" alt="Widget" width="80">"#));
        assert!(html.contains("<p>$9.99</p>"));
        assert!(html.contains(r#"<span class="close-modal">&times;</span>"#));
        assert!(html.contains("Redirecting to checkout..."));
    }

    #[test]
    fn test_render_modal_escapes_page_text() {
        let item = LineItem::new("p1").with_name(r#"<script>alert("x")</script>"#);
        let html = render_confirmation_modal(&item);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_modal_missing_fields() {
        let html = render_confirmation_modal(&LineItem::new("p1"));
        assert!(html.contains(r#"<img src="" alt="" width="80">"#));
    }
}
