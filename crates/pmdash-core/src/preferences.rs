//! Cross-panel UI preferences with copy-on-write transitions.
//!
//! The transition functions never touch their input; they return a new
//! [`Preferences`] value. [`ViewPreferenceStore`] publishes each result behind
//! a fresh `Arc`, so a consumer holding the previous snapshot sees no change
//! and can detect a new one with `Arc::ptr_eq`.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::navigation::ViewKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub active_view: ViewKey,
    pub collapsed_sections: BTreeSet<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            active_view: ViewKey::DEFAULT,
            collapsed_sections: BTreeSet::new(),
        }
    }
}

impl Preferences {
    #[must_use]
    pub fn is_collapsed(&self, section_id: &str) -> bool {
        self.collapsed_sections.contains(section_id.trim())
    }
}

/// Collapse `section_id` if expanded, expand it if collapsed. Blank ids are ignored.
#[must_use]
pub fn toggle_section(prefs: &Preferences, section_id: &str) -> Preferences {
    let mut next = prefs.clone();
    let section_id = section_id.trim();
    if section_id.is_empty() {
        return next;
    }
    if !next.collapsed_sections.remove(section_id) {
        next.collapsed_sections.insert(section_id.to_owned());
    }
    next
}

#[must_use]
pub fn set_dark_mode(prefs: &Preferences, enabled: bool) -> Preferences {
    Preferences {
        dark_mode: enabled,
        ..prefs.clone()
    }
}

/// Replace the active view. Navigating to the current view is a real transition.
#[must_use]
pub fn navigate(prefs: &Preferences, view: ViewKey) -> Preferences {
    Preferences {
        active_view: view,
        ..prefs.clone()
    }
}

/// Sole owner of the current [`Preferences`] snapshot and the matrix selection.
#[derive(Debug, Clone)]
pub struct ViewPreferenceStore {
    current: Arc<Preferences>,
    selection: Option<String>,
    revision: u64,
}

impl Default for ViewPreferenceStore {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}

impl ViewPreferenceStore {
    #[must_use]
    pub fn new(initial: Preferences) -> Self {
        Self {
            current: Arc::new(initial),
            selection: None,
            revision: 0,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Preferences> {
        Arc::clone(&self.current)
    }

    /// Number of snapshots published since construction.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn toggle_section(&mut self, section_id: &str) -> Arc<Preferences> {
        let next = toggle_section(&self.current, section_id);
        tracing::debug!(
            section = section_id,
            collapsed = next.is_collapsed(section_id),
            "section toggled"
        );
        self.publish(next)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Arc<Preferences> {
        let next = set_dark_mode(&self.current, enabled);
        tracing::debug!(enabled, "dark mode set");
        self.publish(next)
    }

    /// Switch views. The selection belongs to the panel being left, so it is cleared.
    pub fn navigate(&mut self, view: ViewKey) -> Arc<Preferences> {
        let next = navigate(&self.current, view);
        self.selection = None;
        self.publish(next)
    }

    pub fn select(&mut self, entity_id: Option<&str>) {
        self.selection = entity_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned);
        tracing::debug!(selection = ?self.selection, "selection changed");
    }

    fn publish(&mut self, next: Preferences) -> Arc<Preferences> {
        self.current = Arc::new(next);
        self.revision += 1;
        Arc::clone(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{navigate, set_dark_mode, toggle_section, Preferences, ViewPreferenceStore};
    use crate::navigation::ViewKey;

    #[test]
    fn toggle_twice_restores_original() {
        let prefs = Preferences::default();
        let once = toggle_section(&prefs, "X");
        assert!(once.is_collapsed("X"));
        let twice = toggle_section(&once, "X");
        assert_eq!(twice, prefs);
    }

    #[test]
    fn blank_section_id_is_ignored() {
        let prefs = Preferences::default();
        assert_eq!(toggle_section(&prefs, "   "), prefs);
    }

    #[test]
    fn transitions_leave_input_untouched() {
        let prefs = Preferences::default();
        let dark = set_dark_mode(&prefs, true);
        let moved = navigate(&dark, ViewKey::Risk);
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.active_view, ViewKey::Dashboard);
        assert!(dark.dark_mode);
        assert_eq!(dark.active_view, ViewKey::Dashboard);
        assert!(moved.dark_mode);
        assert_eq!(moved.active_view, ViewKey::Risk);
    }

    #[test]
    fn store_publishes_new_snapshot_per_transition() {
        let mut store = ViewPreferenceStore::default();
        let before = store.snapshot();
        let after = store.set_dark_mode(false);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(store.revision(), 1);
        assert!(Arc::ptr_eq(&after, &store.snapshot()));
    }

    #[test]
    fn navigation_clears_selection() {
        let mut store = ViewPreferenceStore::default();
        store.select(Some(" sh-1 "));
        assert_eq!(store.selection(), Some("sh-1"));
        store.navigate(ViewKey::Stakeholders);
        assert_eq!(store.selection(), None);
        store.select(Some(""));
        assert_eq!(store.selection(), None);
    }
}
