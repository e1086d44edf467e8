//! Category selection, carousel position, and flipped cards.
//!
//! Every method takes the active collection's length from the caller, so the
//! state never holds an index it cannot justify against the data it is rendered with.

use std::collections::HashSet;

use portfolio_api::models::content::CollectionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active: CollectionKind,
    index: usize,
    flipped: HashSet<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            active: CollectionKind::Experiences,
            index: 0,
            flipped: HashSet::new(),
        }
    }
}

impl NavigationState {
    pub fn active(&self) -> CollectionKind {
        self.active
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn flipped(&self) -> &HashSet<String> {
        &self.flipped
    }

    /// Wraps from last to first. No-op on an empty collection.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Wraps from first to last. No-op on an empty collection.
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
    }

    /// Jumps straight to `index`, e.g. from a timeline click. Out-of-range
    /// indices are ignored. Returns whether the position changed.
    pub fn select_index(&mut self, index: usize, len: usize) -> bool {
        if index >= len || index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    pub fn toggle_flip(&mut self, id: &str) {
        if !self.flipped.remove(id) {
            self.flipped.insert(id.to_string());
        }
    }

    pub fn is_flipped(&self, id: &str) -> bool {
        self.flipped.contains(id)
    }

    /// Switches collection and resets position and flips in the same step.
    pub fn select_collection(&mut self, kind: CollectionKind) {
        self.active = kind;
        self.index = 0;
        self.flipped.clear();
    }
}

/// Horizontal scroll that centres the active marker in a timeline of `len`
/// markers, each `marker_width` columns wide, shown through a `viewport_width`
/// window. Clamped so the strip never scrolls past either end.
pub fn timeline_offset(viewport_width: u16, marker_width: u16, len: usize, index: usize) -> u16 {
    let total = marker_width as usize * len;
    let max_offset = total.saturating_sub(viewport_width as usize);
    let centre = index * marker_width as usize + marker_width as usize / 2;
    let offset = centre.saturating_sub(viewport_width as usize / 2).min(max_offset);
    u16::try_from(offset).unwrap_or(u16::MAX)
}
