//! pmdash-core: status classification and dashboard coordination engine.
//!
//! Turns raw program status signals into uniform render tokens, rolls count
//! pairs up into percentages, buckets stakeholders and risks into two-axis
//! priority matrices, and owns the cross-panel UI state (active view, dark
//! mode, collapsed sections) together with the invalidation token that tells
//! panels when to rebuild.

pub mod config;
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod navigation;
pub mod preferences;
pub mod session;
pub mod status;

/// Crate identity label.
pub fn crate_label() -> &'static str {
    "pmdash-core"
}
