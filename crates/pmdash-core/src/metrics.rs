//! Percentage rollups over (numerator, denominator) count pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::StatusValue;

/// Paired counts behind every percentage shown on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MetricPair {
    pub numerator: u64,
    pub denominator: u64,
}

impl MetricPair {
    #[must_use]
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    #[must_use]
    pub fn percentage(self) -> u8 {
        percentage(self.numerator, self.denominator)
    }

    /// Zero denominator: nothing to measure against.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.denominator == 0
    }
}

impl fmt::Display for MetricPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// `round_half_up(100 * n / d)` clamped to `[0, 100]`; zero denominator is 0.
#[must_use]
pub fn percentage(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    if numerator >= denominator {
        return 100;
    }
    let numerator = u128::from(numerator);
    let denominator = u128::from(denominator);
    let rounded = (200 * numerator + denominator) / (2 * denominator);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Pass rate over completed tests. Nothing completed reads as 0, not an error.
#[must_use]
pub fn pass_rate(passed: u64, completed: u64) -> u8 {
    if completed == 0 {
        return 0;
    }
    percentage(passed, completed)
}

/// Status for a completion percentage: below `fail_below` is Red, below
/// `warn_below` is Yellow, otherwise Green.
#[must_use]
pub fn progress_status(percentage: u8, warn_below: u8, fail_below: u8) -> StatusValue {
    let warn_below = warn_below.min(100);
    let fail_below = fail_below.min(warn_below);
    if percentage < fail_below {
        StatusValue::Red
    } else if percentage < warn_below {
        StatusValue::Yellow
    } else {
        StatusValue::Green
    }
}
