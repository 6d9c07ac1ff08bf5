//! pmdash-tui: headless dashboard shell over the pmdash-core engine.
//!
//! Loads program data, drives the dashboard session from interaction
//! commands, and emits per-panel view models for a renderer to draw.

pub mod data;
pub mod loader;
pub mod logging;
pub mod panels;
pub mod shell;

/// Stable crate label used by bootstrap smoke tests.
#[must_use]
pub fn crate_label() -> &'static str {
    "pmdash-tui"
}
