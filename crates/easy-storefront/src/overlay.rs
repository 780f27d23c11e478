//! Tracking of transient overlays (modal, notification).

use std::fmt;

/// Identifies one shown overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of overlay the storefront shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Full-screen "Item Added to Cart" modal shown by "buy now".
    ConfirmationModal,
    /// Corner toast shown by "add to cart".
    MiniNotification,
}

/// Set of currently shown overlays, each with a view-specific handle.
///
/// Dismissing is guarded: an overlay that is no longer shown (closed by the
/// user, or already dismissed) is ignored.
#[derive(Debug)]
pub struct Overlays<T> {
    next_id: u64,
    shown: Vec<(OverlayId, OverlayKind, T)>,
}

impl<T> Default for Overlays<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            shown: Vec::new(),
        }
    }
}

impl<T> Overlays<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly shown overlay.
    pub fn open(&mut self, kind: OverlayKind, handle: T) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.shown.push((id, kind, handle));
        id
    }

    /// Forget an overlay if it is currently shown, handing back its handle.
    pub fn dismiss(&mut self, id: OverlayId) -> Option<T> {
        let index = self.shown.iter().position(|(sid, _, _)| *sid == id)?;
        Some(self.shown.remove(index).2)
    }

    pub fn is_shown(&self, id: OverlayId) -> bool {
        self.shown.iter().any(|(sid, _, _)| *sid == id)
    }

    /// Kind of a shown overlay.
    pub fn kind(&self, id: OverlayId) -> Option<OverlayKind> {
        self.shown
            .iter()
            .find(|(sid, _, _)| *sid == id)
            .map(|(_, kind, _)| *kind)
    }

    /// Handle of a shown overlay.
    pub fn get(&self, id: OverlayId) -> Option<&T> {
        self.shown
            .iter()
            .find(|(sid, _, _)| *sid == id)
            .map(|(_, _, handle)| handle)
    }

    /// Shown overlays of one kind, oldest first.
    pub fn of_kind(&self, kind: OverlayKind) -> impl Iterator<Item = (OverlayId, &T)> {
        self.shown
            .iter()
            .filter(move |(_, k, _)| *k == kind)
            .map(|(id, _, handle)| (*id, handle))
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}
