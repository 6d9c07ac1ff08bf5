//! Single-owner event dispatch over the preference store and navigation.

use std::sync::Arc;

use serde::Serialize;

use crate::navigation::{
    render_directive, NavigationController, PanelDescriptor, RenderDirective, RenderStamp,
    ViewKey,
};
use crate::preferences::{Preferences, ViewPreferenceStore};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    ToggleSection(String),
    SetDarkMode(bool),
    /// Untyped view key, resolved fail-soft.
    Navigate(String),
    NavigateTo(ViewKey),
    Select(Option<String>),
}

/// Everything a panel needs for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelFrame {
    pub preferences: Arc<Preferences>,
    pub panel: PanelDescriptor,
    pub selection: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    store: ViewPreferenceStore,
    navigation: NavigationController,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}

impl DashboardSession {
    /// The initial active view doubles as the fallback for unknown keys.
    #[must_use]
    pub fn new(initial: Preferences) -> Self {
        let navigation = NavigationController::new(initial.active_view);
        Self {
            store: ViewPreferenceStore::new(initial),
            navigation,
        }
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<Preferences> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn frame(&self) -> PanelFrame {
        PanelFrame {
            preferences: self.store.snapshot(),
            panel: self.navigation.current(),
            selection: self.store.selection().map(str::to_owned),
        }
    }

    /// Apply one event and return the resulting frame. Events are applied in
    /// call order; each completes before the next begins.
    pub fn dispatch(&mut self, event: DashboardEvent) -> PanelFrame {
        match event {
            DashboardEvent::ToggleSection(section_id) => {
                self.store.toggle_section(&section_id);
            }
            DashboardEvent::SetDarkMode(enabled) => {
                self.store.set_dark_mode(enabled);
            }
            DashboardEvent::Navigate(raw) => {
                let panel = self.navigation.resolve_key(&raw);
                self.store.navigate(panel.view);
            }
            DashboardEvent::NavigateTo(view) => {
                let panel = self.navigation.resolve(view);
                self.store.navigate(panel.view);
            }
            DashboardEvent::Select(entity_id) => {
                self.store.select(entity_id.as_deref());
            }
        }
        self.frame()
    }

    #[must_use]
    pub fn stamp(&self) -> RenderStamp {
        RenderStamp {
            token: self.navigation.token(),
            preferences: self.store.snapshot(),
            selection: self.store.selection().map(str::to_owned),
        }
    }

    /// How a panel that last rendered with `last_seen` must react to the current state.
    #[must_use]
    pub fn directive(&self, last_seen: Option<&RenderStamp>) -> RenderDirective {
        render_directive(
            last_seen,
            self.navigation.token(),
            &self.store.snapshot(),
            self.store.selection(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardEvent, DashboardSession};
    use crate::navigation::{RenderDirective, ViewKey};

    #[test]
    fn navigation_keeps_preferences_and_controller_in_step() {
        let mut session = DashboardSession::default();
        let frame = session.dispatch(DashboardEvent::Navigate("testing".to_owned()));
        assert_eq!(frame.panel.view, ViewKey::Testing);
        assert_eq!(frame.preferences.active_view, ViewKey::Testing);
    }

    #[test]
    fn section_toggle_only_requires_rerender() {
        let mut session = DashboardSession::default();
        let stamp = session.stamp();
        session.dispatch(DashboardEvent::ToggleSection("Budget".to_owned()));
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Rerender);
        let stamp = session.stamp();
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Unchanged);
        session.dispatch(DashboardEvent::NavigateTo(ViewKey::Dashboard));
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Remount);
    }

    #[test]
    fn selection_change_requires_rerender() {
        let mut session = DashboardSession::default();
        session.dispatch(DashboardEvent::NavigateTo(ViewKey::Stakeholders));
        let stamp = session.stamp();
        session.dispatch(DashboardEvent::Select(Some("sh-audit".to_owned())));
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Rerender);

        let stamp = session.stamp();
        session.dispatch(DashboardEvent::Select(Some("sh-audit".to_owned())));
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Unchanged);
        session.dispatch(DashboardEvent::Select(None));
        assert_eq!(session.directive(Some(&stamp)), RenderDirective::Rerender);
    }

    #[test]
    fn selection_survives_toggles_but_not_navigation() {
        let mut session = DashboardSession::default();
        session.dispatch(DashboardEvent::Select(Some("risk-7".to_owned())));
        let frame = session.dispatch(DashboardEvent::ToggleSection("Risk".to_owned()));
        assert_eq!(frame.selection.as_deref(), Some("risk-7"));
        let frame = session.dispatch(DashboardEvent::Navigate("risk".to_owned()));
        assert_eq!(frame.selection, None);
    }
}
