//! Logging infrastructure for model extraction
//!
//! Structured logging through the `tracing` crate. Events are always written
//! to stderr: the generated code may be going to stdout, and the two must not mix.
//!
//! # Usage
//!
//! ```rust
//! use xml2models::core::logging::init_logging;
//!
//! // Initialize with custom level and format
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Log Levels
//!
//! - `trace`: Every element the extractor visits
//! - `debug`: One event per class, property and relation
//! - `info`: Run summary (class and relation counts, output destination)
//! - `warn`: Data inconsistencies such as relation reverse-name mismatches (default)
//! - `error`: Error messages
//!
//! # Log Formats
//!
//! - `compact`: Single-line format (default)
//! - `pretty`: Multi-line format with colors, file and line numbers
//! - `json`: JSON format, one object per event
//!
//! # Environment Variables
//!
//! - `XML2MODELS_LOG_LEVEL`: Set log level (trace|debug|info|warn|error|off)
//! - `XML2MODELS_LOG_FORMAT`: Set log format (compact|pretty|json)
//! - `RUST_LOG`: Fallback level or filter directives (tracing-subscriber standard)
//!
//! # Filtering Logs
//!
//! ```bash
//! # Only the extractor, at trace level
//! RUST_LOG="xml2models::model::parser=trace" xml2models model.xml
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Default filter when neither an argument nor the environment names one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// # Arguments
///
/// * `level` - Optional level or filter directive string.
///            If None, uses `XML2MODELS_LOG_LEVEL`, then `RUST_LOG`,
///            then [`DEFAULT_LOG_LEVEL`].
/// * `format` - Optional log format (compact|pretty|json).
///             If None, uses `XML2MODELS_LOG_FORMAT`, or defaults to `compact`.
///
/// # Returns
///
/// Returns an error for an unknown format, or if a global subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("XML2MODELS_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var("XML2MODELS_LOG_FORMAT").ok())
        .unwrap_or_else(|| "compact".to_string());

    let format = LogFormat::from_str(&log_format)
        .map_err(|e| format!("Invalid log format: {}", e))?;

    let filter =
        EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_file(false)
                        .with_line_number(false)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}
