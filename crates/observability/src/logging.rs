//! Logging initialization
//!
//! Sets up the tracing subscriber in one of three output formats. The
//! filter comes from `RUST_LOG` when set, otherwise from the configured
//! directive (`logging.filter` in the pricing config).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    #[default]
    Pretty,
    /// JSON lines, for log aggregation
    Json,
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log format: {}", s))
    }
}

fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber
///
/// # Arguments
///
/// * `service_name` - Name reported in the startup event
/// * `format` - Output format
/// * `default_filter` - `EnvFilter` directive used when `RUST_LOG` is unset
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(service_name: &str, format: LogFormat, default_filter: &str) -> anyhow::Result<()> {
    let env_filter = build_filter(default_filter);

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(true),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_current_span(true))
                .try_init()?;
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init()?;
        }
    }

    tracing::info!(
        service = service_name,
        format = ?format,
        filter = default_filter,
        "Logging initialized"
    );

    Ok(())
}

/// Pretty format at `info`
pub fn init_default_logging(service_name: &str) -> anyhow::Result<()> {
    init_logging(service_name, LogFormat::Pretty, "info")
}

/// Install a test-writer subscriber, ignoring the error when another test
/// already installed one.
pub fn try_init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter("debug"))
        .with_test_writer()
        .try_init();
}
