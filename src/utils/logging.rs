//! Structured logging and secret redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! keeps the Places API key out of log output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{PlacesError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so command output on stdout stays machine-readable.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| PlacesError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Replaces the value of every `key=` query parameter with a placeholder.
///
/// Request URLs carry the API key in the query string; run them through
/// this before logging.
pub fn sanitize(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = find_key_param(rest) {
        let value_start = pos + "key=".len();
        result.push_str(&rest[..value_start]);
        result.push_str("[REDACTED]");

        let value_len = rest[value_start..]
            .find(|c: char| c == '&' || c == '#' || c.is_whitespace() || c == '"')
            .unwrap_or(rest.len() - value_start);
        rest = &rest[value_start + value_len..];
    }

    result.push_str(rest);
    result
}

/// Position of a `key=` that starts a query parameter (not e.g. `monkey=`).
fn find_key_param(input: &str) -> Option<usize> {
    input.match_indices("key=").map(|(i, _)| i).find(|&i| {
        i == 0 || matches!(input.as_bytes()[i - 1], b'?' | b'&')
    })
}
