//! Headless dashboard shell: line commands in, panel snapshots out.

use std::sync::Arc;

use pmdash_core::config::DashboardConfig;
use pmdash_core::matrix::UnclassifiedPolicy;
use pmdash_core::navigation::{PanelDescriptor, RenderDirective, RenderStamp};
use pmdash_core::preferences::Preferences;
use pmdash_core::session::{DashboardEvent, DashboardSession};
use serde::Serialize;

use crate::data::ProgramData;
use crate::panels::{build_panel_view_or_fallback, PanelView};

/// Parse one interaction command. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<DashboardEvent>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb.to_ascii_lowercase().as_str() {
        "toggle" => {
            if rest.is_empty() {
                return Err("toggle requires a section id".to_owned());
            }
            DashboardEvent::ToggleSection(rest.to_owned())
        }
        "dark" => match rest.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => DashboardEvent::SetDarkMode(true),
            "off" | "false" | "0" => DashboardEvent::SetDarkMode(false),
            other => return Err(format!("dark expects on|off, got {other:?}")),
        },
        "navigate" | "nav" | "go" => DashboardEvent::Navigate(rest.to_owned()),
        "select" => {
            if rest.is_empty() || rest.eq_ignore_ascii_case("none") {
                DashboardEvent::Select(None)
            } else {
                DashboardEvent::Select(Some(rest.to_owned()))
            }
        }
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Some(event))
}

/// One render pass worth of outbound state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub preferences: Arc<Preferences>,
    pub panel: PanelDescriptor,
    pub selection: Option<String>,
    pub directive: RenderDirective,
    pub hidden_sections: Vec<&'static str>,
    pub view: PanelView,
}

#[derive(Debug)]
struct CachedPanel {
    stamp: RenderStamp,
    view: PanelView,
}

#[derive(Debug)]
pub struct DashboardShell {
    session: DashboardSession,
    data: ProgramData,
    policy: UnclassifiedPolicy,
    cached: Option<CachedPanel>,
}

impl DashboardShell {
    #[must_use]
    pub fn new(config: &DashboardConfig, data: ProgramData) -> Self {
        Self {
            session: DashboardSession::new(config.initial_preferences()),
            data,
            policy: config.unclassified_policy(),
            cached: None,
        }
    }

    pub fn apply(&mut self, event: DashboardEvent) -> PanelSnapshot {
        self.session.dispatch(event);
        self.snapshot()
    }

    /// Snapshot of the active panel. The panel view model is rebuilt unless
    /// nothing it depends on changed since the previous snapshot.
    pub fn snapshot(&mut self) -> PanelSnapshot {
        let frame = self.session.frame();
        let directive = self
            .session
            .directive(self.cached.as_ref().map(|cached| &cached.stamp));

        let reusable = self
            .cached
            .as_ref()
            .filter(|_| directive == RenderDirective::Unchanged)
            .map(|cached| cached.view.clone());
        let view = match reusable {
            Some(view) => view,
            None => {
                if directive == RenderDirective::Remount {
                    tracing::debug!(
                        view = frame.panel.view.slug(),
                        token = frame.panel.invalidation_token.value(),
                        "remounting panel"
                    );
                }
                build_panel_view_or_fallback(
                    frame.panel.view,
                    &self.data,
                    &frame.preferences,
                    frame.selection.as_deref(),
                    self.policy,
                )
            }
        };

        self.cached = Some(CachedPanel {
            stamp: self.session.stamp(),
            view: view.clone(),
        });

        let hidden_sections = frame
            .panel
            .sections
            .iter()
            .copied()
            .filter(|section| frame.preferences.is_collapsed(section))
            .collect();

        PanelSnapshot {
            preferences: frame.preferences,
            panel: frame.panel,
            selection: frame.selection,
            directive,
            hidden_sections,
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use pmdash_core::config::DashboardConfig;
    use pmdash_core::navigation::{RenderDirective, ViewKey};
    use pmdash_core::session::DashboardEvent;

    use super::{parse_command, DashboardShell};
    use crate::data::ProgramData;
    use crate::panels::PanelView;

    #[test]
    fn parse_command_covers_every_verb() {
        assert_eq!(
            parse_command("toggle Risk Register"),
            Ok(Some(DashboardEvent::ToggleSection("Risk Register".to_owned())))
        );
        assert_eq!(
            parse_command("dark ON"),
            Ok(Some(DashboardEvent::SetDarkMode(true)))
        );
        assert_eq!(
            parse_command("nav risk"),
            Ok(Some(DashboardEvent::Navigate("risk".to_owned())))
        );
        assert_eq!(
            parse_command("select none"),
            Ok(Some(DashboardEvent::Select(None)))
        );
        assert_eq!(parse_command("  # comment"), Ok(None));
        assert_eq!(parse_command(""), Ok(None));
        assert!(parse_command("toggle").is_err());
        assert!(parse_command("dark maybe").is_err());
        assert!(parse_command("launch").is_err());
    }

    #[test]
    fn first_snapshot_remounts_then_stays_unchanged() {
        let mut shell = DashboardShell::new(&DashboardConfig::default(), ProgramData::default());
        let first = shell.snapshot();
        assert_eq!(first.directive, RenderDirective::Remount);
        assert!(matches!(first.view, PanelView::Dashboard(_)));
        let second = shell.snapshot();
        assert_eq!(second.directive, RenderDirective::Unchanged);
        assert_eq!(second.view, first.view);
    }

    #[test]
    fn toggles_rerender_and_navigation_remounts() {
        let mut shell = DashboardShell::new(&DashboardConfig::default(), ProgramData::default());
        shell.snapshot();
        let toggled = shell.apply(DashboardEvent::ToggleSection("Risk".to_owned()));
        assert_eq!(toggled.directive, RenderDirective::Rerender);
        assert_eq!(toggled.hidden_sections, vec!["Risk"]);

        let moved = shell.apply(DashboardEvent::Navigate("risk".to_owned()));
        assert_eq!(moved.directive, RenderDirective::Remount);
        assert_eq!(moved.panel.view, ViewKey::Risk);
        assert!(moved.hidden_sections.is_empty());
        assert!(matches!(moved.view, PanelView::Risk(_)));
    }
}
