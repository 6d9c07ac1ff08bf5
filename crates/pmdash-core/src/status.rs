//! Status classification: raw status signals to semantic render tokens.
//!
//! Every panel renders statuses through [`classify`], so the colour, icon and
//! progress-bar mode for a given status are identical everywhere.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed status enumeration with an explicit fallback for invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusValue {
    Green,
    Yellow,
    Red,
    #[default]
    Unknown,
}

impl StatusValue {
    /// Known statuses, worst first.
    pub const ORDER: [StatusValue; 3] = [StatusValue::Red, StatusValue::Yellow, StatusValue::Green];

    /// Parse free-form status text. Never fails: unrecognized text is `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" | "g" => Self::Green,
            "yellow" | "y" | "amber" => Self::Yellow,
            "red" | "r" => Self::Red,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "On Track",
            Self::Yellow => "At Risk",
            Self::Red => "Off Track",
            Self::Unknown => "Unknown",
        }
    }
}

impl Serialize for StatusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let status = Self::parse(&raw);
        if status == Self::Unknown && !raw.trim().eq_ignore_ascii_case("unknown") {
            tracing::warn!(raw = %raw, "unrecognized status text; classifying as unknown");
        }
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconToken {
    Check,
    Warning,
    Cross,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    Normal,
    Active,
    Exception,
    Success,
}

/// Render tokens derived from a [`StatusValue`]. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatusDescriptor {
    pub color_token: &'static str,
    pub icon_token: IconToken,
    pub progress_mode: ProgressMode,
}

pub const NEUTRAL_DESCRIPTOR: StatusDescriptor = StatusDescriptor {
    color_token: "default",
    icon_token: IconToken::None,
    progress_mode: ProgressMode::Normal,
};

#[must_use]
pub fn classify(status: StatusValue) -> StatusDescriptor {
    match status {
        StatusValue::Green => StatusDescriptor {
            color_token: "success",
            icon_token: IconToken::Check,
            progress_mode: ProgressMode::Success,
        },
        StatusValue::Yellow => StatusDescriptor {
            color_token: "warning",
            icon_token: IconToken::Warning,
            progress_mode: ProgressMode::Active,
        },
        StatusValue::Red => StatusDescriptor {
            color_token: "error",
            icon_token: IconToken::Cross,
            progress_mode: ProgressMode::Exception,
        },
        StatusValue::Unknown => NEUTRAL_DESCRIPTOR,
    }
}

/// Severity rank: Red=2, Yellow=1, Green=0, Unknown=-1.
#[must_use]
pub fn rank(status: StatusValue) -> i8 {
    match status {
        StatusValue::Red => 2,
        StatusValue::Yellow => 1,
        StatusValue::Green => 0,
        StatusValue::Unknown => -1,
    }
}

/// Worst-of-N rollup. Empty input rolls up to `Unknown`.
#[must_use]
pub fn overall_status<I>(children: I) -> StatusValue
where
    I: IntoIterator<Item = StatusValue>,
{
    children
        .into_iter()
        .fold(StatusValue::Unknown, |worst, next| {
            if rank(next) > rank(worst) {
                next
            } else {
                worst
            }
        })
}

#[cfg(test)]
mod tests {
    use super::{
        classify, overall_status, rank, IconToken, ProgressMode, StatusValue, NEUTRAL_DESCRIPTOR,
    };

    #[test]
    fn known_statuses_map_to_fixed_triples() {
        let green = classify(StatusValue::Green);
        assert_eq!(green.color_token, "success");
        assert_eq!(green.icon_token, IconToken::Check);
        assert_eq!(green.progress_mode, ProgressMode::Success);

        let yellow = classify(StatusValue::Yellow);
        assert_eq!(yellow.color_token, "warning");
        assert_eq!(yellow.icon_token, IconToken::Warning);
        assert_eq!(yellow.progress_mode, ProgressMode::Active);

        let red = classify(StatusValue::Red);
        assert_eq!(red.color_token, "error");
        assert_eq!(red.icon_token, IconToken::Cross);
        assert_eq!(red.progress_mode, ProgressMode::Exception);
    }

    #[test]
    fn unparseable_text_falls_back_to_neutral_descriptor() {
        for raw in ["", "purple", "GREENISH", "  "] {
            let status = StatusValue::parse(raw);
            assert_eq!(status, StatusValue::Unknown, "raw={raw:?}");
            assert_eq!(classify(status), NEUTRAL_DESCRIPTOR);
        }
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(StatusValue::parse(" Green "), StatusValue::Green);
        assert_eq!(StatusValue::parse("YELLOW"), StatusValue::Yellow);
        assert_eq!(StatusValue::parse("r"), StatusValue::Red);
        assert_eq!(StatusValue::parse("amber"), StatusValue::Yellow);
    }

    #[test]
    fn rank_orders_red_over_yellow_over_green_over_unknown() {
        assert!(rank(StatusValue::Red) > rank(StatusValue::Yellow));
        assert!(rank(StatusValue::Yellow) > rank(StatusValue::Green));
        assert!(rank(StatusValue::Green) > rank(StatusValue::Unknown));
    }

    #[test]
    fn overall_status_picks_worst_child() {
        let children = [StatusValue::Green, StatusValue::Red, StatusValue::Yellow];
        assert_eq!(overall_status(children), StatusValue::Red);
        assert_eq!(
            overall_status([StatusValue::Unknown, StatusValue::Green]),
            StatusValue::Green
        );
        assert_eq!(overall_status([]), StatusValue::Unknown);
    }

    #[test]
    fn deserialize_never_fails_on_unknown_text() {
        let parsed: Vec<StatusValue> =
            match serde_json::from_str(r#"["Green", "bogus", "red"]"#) {
                Ok(parsed) => parsed,
                Err(err) => panic!("status list should parse: {err}"),
            };
        assert_eq!(
            parsed,
            vec![StatusValue::Green, StatusValue::Unknown, StatusValue::Red]
        );
    }
}
