//! Configuration types for the dashboard engine.
//!
//! Root configuration struct and nested section types with full defaults and
//! validation. Every section deserializes with `#[serde(default)]`, so a
//! config file only needs the keys it overrides.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::matrix::UnclassifiedPolicy;
use crate::navigation::ViewKey;
use crate::preferences::Preferences;

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ui: UiConfig,
    pub matrix: MatrixConfig,
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Validates the entire configuration, returning an error message on failure.
    pub fn validate(&self) -> Result<(), String> {
        // UI
        if ViewKey::parse(&self.ui.default_view).is_none() {
            let known = ViewKey::ORDER
                .iter()
                .map(|view| view.slug())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!("ui.default_view must be one of {known}"));
        }
        for (i, section) in self.ui.collapsed_sections.iter().enumerate() {
            if section.trim().is_empty() {
                return Err(format!("ui.collapsed_sections[{i}] must not be blank"));
            }
        }

        // Matrix
        if UnclassifiedPolicy::parse(&self.matrix.unclassified_policy).is_none() {
            return Err("matrix.unclassified_policy must be one of bucket, reject".into());
        }

        // Logging
        match self.logging.level.to_lowercase().trim() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err("logging.level must be one of trace, debug, info, warn, error".into())
            }
        }
        match self.logging.format.to_lowercase().trim() {
            "console" | "json" => {}
            _ => return Err("logging.format must be one of console, json".into()),
        }

        Ok(())
    }

    /// Start-up preferences. Falls back to defaults for values `validate` rejects.
    #[must_use]
    pub fn initial_preferences(&self) -> Preferences {
        Preferences {
            dark_mode: self.ui.dark_mode,
            active_view: ViewKey::parse(&self.ui.default_view).unwrap_or(ViewKey::DEFAULT),
            collapsed_sections: self
                .ui
                .collapsed_sections
                .iter()
                .map(|section| section.trim())
                .filter(|section| !section.is_empty())
                .map(str::to_owned)
                .collect::<BTreeSet<_>>(),
        }
    }

    #[must_use]
    pub fn unclassified_policy(&self) -> UnclassifiedPolicy {
        UnclassifiedPolicy::parse(&self.matrix.unclassified_policy).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Section configs
// ---------------------------------------------------------------------------

/// Start-up UI state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_view: String,
    pub dark_mode: bool,
    pub collapsed_sections: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: ViewKey::DEFAULT.slug().into(),
            dark_mode: false,
            collapsed_sections: Vec::new(),
        }
    }
}

/// Matrix bucketing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub unclassified_policy: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            unclassified_policy: "bucket".into(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "console".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
