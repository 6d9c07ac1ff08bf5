//! Tracing subscriber bootstrap.
//!
//! Logs always go to stderr; stdout carries the JSON snapshots.

use pmdash_core::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Console,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Console,
        }
    }
}

/// Filter directive: `RUST_LOG` wins when set, else the configured level.
#[must_use]
pub fn filter_directive(config: &LoggingConfig) -> String {
    match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ => config.level.trim().to_ascii_lowercase(),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_new(filter_directive(config)).unwrap_or_else(|_| EnvFilter::new("info"));
    let result = match LogFormat::parse(&config.format) {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Console => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(err) = result {
        eprintln!("warning: logging already initialized: {err}");
    }
}
