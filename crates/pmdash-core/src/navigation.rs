//! Panel navigation and invalidation.
//!
//! Every navigation, including one to the view already shown, advances the
//! [`InvalidationToken`]. A panel that rendered under an older token must
//! drop its cached state and rebuild; one that only sees a new preferences
//! snapshot re-renders in place.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::preferences::Preferences;

/// One key per dashboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKey {
    Dashboard,
    Schedule,
    Budget,
    Risk,
    Kpp,
    Readiness,
    Testing,
    Stakeholders,
    Requirements,
}

impl ViewKey {
    pub const DEFAULT: ViewKey = ViewKey::Dashboard;

    pub const ORDER: [ViewKey; 9] = [
        ViewKey::Dashboard,
        ViewKey::Schedule,
        ViewKey::Budget,
        ViewKey::Risk,
        ViewKey::Kpp,
        ViewKey::Readiness,
        ViewKey::Testing,
        ViewKey::Stakeholders,
        ViewKey::Requirements,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Schedule => "schedule",
            Self::Budget => "budget",
            Self::Risk => "risk",
            Self::Kpp => "kpp",
            Self::Readiness => "readiness",
            Self::Testing => "testing",
            Self::Stakeholders => "stakeholders",
            Self::Requirements => "requirements",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Program Dashboard",
            Self::Schedule => "Schedule",
            Self::Budget => "Budget",
            Self::Risk => "Risk Management",
            Self::Kpp => "Key Performance Parameters",
            Self::Readiness => "Technology & Manufacturing Readiness",
            Self::Testing => "Test & Evaluation",
            Self::Stakeholders => "Stakeholder Engagement",
            Self::Requirements => "Requirements Verification",
        }
    }

    /// Collapsible section ids shown on this panel.
    #[must_use]
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &["Schedule", "Budget", "Risk", "KPP", "Readiness", "Testing"],
            Self::Schedule => &["Milestones", "Critical Path"],
            Self::Budget => &["Cost Summary", "Earned Value"],
            Self::Risk => &["Risk Matrix", "Risk Register"],
            Self::Kpp => &["KPP Table"],
            Self::Readiness => &["TRL", "MRL"],
            Self::Testing => &["Test Campaigns"],
            Self::Stakeholders => &["Engagement Matrix", "Stakeholder Detail"],
            Self::Requirements => &["Verification"],
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ORDER
            .into_iter()
            .find(|view| view.slug() == normalized)
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct InvalidationToken(u64);

impl InvalidationToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelDescriptor {
    pub view: ViewKey,
    pub title: &'static str,
    pub sections: &'static [&'static str],
    pub invalidation_token: InvalidationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderDirective {
    /// Discard cached panel state and rebuild from the current snapshot.
    Remount,
    /// Same mount, new preferences snapshot or selection.
    Rerender,
    Unchanged,
}

/// What a panel last rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStamp {
    pub token: InvalidationToken,
    pub preferences: Arc<Preferences>,
    pub selection: Option<String>,
}

#[must_use]
pub fn render_directive(
    last: Option<&RenderStamp>,
    token: InvalidationToken,
    preferences: &Arc<Preferences>,
    selection: Option<&str>,
) -> RenderDirective {
    match last {
        None => RenderDirective::Remount,
        Some(stamp) if stamp.token != token => RenderDirective::Remount,
        Some(stamp) if !Arc::ptr_eq(&stamp.preferences, preferences) => RenderDirective::Rerender,
        Some(stamp) if stamp.selection.as_deref() != selection => RenderDirective::Rerender,
        Some(_) => RenderDirective::Unchanged,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    default_view: ViewKey,
    active: ViewKey,
    token: InvalidationToken,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(ViewKey::DEFAULT)
    }
}

impl NavigationController {
    #[must_use]
    pub fn new(default_view: ViewKey) -> Self {
        Self {
            default_view,
            active: default_view,
            token: InvalidationToken::default(),
        }
    }

    #[must_use]
    pub fn default_view(&self) -> ViewKey {
        self.default_view
    }

    #[must_use]
    pub fn active(&self) -> ViewKey {
        self.active
    }

    #[must_use]
    pub fn token(&self) -> InvalidationToken {
        self.token
    }

    /// Descriptor for the active panel without advancing the token.
    #[must_use]
    pub fn current(&self) -> PanelDescriptor {
        self.describe(self.active)
    }

    /// Transition to `view`. Always advances the token.
    pub fn resolve(&mut self, view: ViewKey) -> PanelDescriptor {
        self.active = view;
        self.token = self.token.next();
        tracing::debug!(
            view = view.slug(),
            token = self.token.value(),
            "navigated"
        );
        self.describe(view)
    }

    /// Fail-soft transition from an untyped key; unknown keys land on the default view.
    pub fn resolve_key(&mut self, raw: &str) -> PanelDescriptor {
        match ViewKey::parse(raw) {
            Some(view) => self.resolve(view),
            None => {
                tracing::warn!(
                    requested = raw,
                    fallback = self.default_view.slug(),
                    "unknown view key; falling back to default view"
                );
                self.resolve(self.default_view)
            }
        }
    }

    fn describe(&self, view: ViewKey) -> PanelDescriptor {
        PanelDescriptor {
            view,
            title: view.label(),
            sections: view.sections(),
            invalidation_token: self.token,
        }
    }
}
