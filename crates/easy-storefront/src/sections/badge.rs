//! Cart counter badge.

/// State of the header cart counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterBadge {
    pub count: u64,
}

impl CounterBadge {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// Text shown in the badge.
    pub fn text(&self) -> String {
        self.count.to_string()
    }

    /// The badge is hidden while the cart is empty.
    pub fn is_visible(&self) -> bool {
        self.count > 0
    }

    /// CSS `display` value for the badge element.
    pub fn display(&self) -> &'static str {
        if self.is_visible() {
            "block"
        } else {
            "none"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_badge_hidden() {
        let badge = CounterBadge::new(0);
        assert_eq!(badge.text(), "0");
        assert!(!badge.is_visible());
        assert_eq!(badge.display(), "none");
    }

    #[test]
    fn test_badge_shows_count() {
        let badge = CounterBadge::new(3);
        assert_eq!(badge.text(), "3");
        assert_eq!(badge.display(), "block");
    }
}
