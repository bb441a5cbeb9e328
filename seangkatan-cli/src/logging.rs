//! Diagnostic logging for the CLI.
//!
//! Command output goes to stdout through [`crate::output`]. Tracing events go
//! to stderr and are off unless requested.
//!
//! # Environment Variables
//!
//! - `SEANGKATAN_DEBUG=true|1|yes` - Enable debug logging
//! - `SEANGKATAN_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `SEANGKATAN_LOG_FORMAT=json|pretty|compact` - Output format (default: json)

use std::env;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

const CRATES: &[&str] = &["seangkatan_cli", "seangkatan_migrate", "seangkatan_mysql"];

/// Whether `SEANGKATAN_DEBUG` is set to "true", "1" or "yes" (case-insensitive).
pub fn is_debug_enabled() -> bool {
    env::var("SEANGKATAN_DEBUG")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Level from `SEANGKATAN_LOG_LEVEL`, else "debug" when debugging, else "warn".
pub fn get_log_level() -> &'static str {
    resolve_level(env::var("SEANGKATAN_LOG_LEVEL").ok().as_deref(), is_debug_enabled())
}

fn resolve_level(requested: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match requested.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

/// Format from `SEANGKATAN_LOG_FORMAT`, defaulting to "json".
pub fn get_log_format() -> &'static str {
    resolve_format(env::var("SEANGKATAN_LOG_FORMAT").ok().as_deref())
}

fn resolve_format(requested: Option<&str>) -> &'static str {
    match requested.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the subscriber. Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("SEANGKATAN_LOG_LEVEL").is_err() {
            return;
        }

        let level = get_log_level();
        let filter =
            EnvFilter::try_new(directives(level)).unwrap_or_else(|_| EnvFilter::new("warn"));
        let layer = fmt::layer().with_writer(std::io::stderr);

        match get_log_format() {
            "json" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init(),
            "compact" => tracing_subscriber::registry()
                .with(filter)
                .with(layer.compact())
                .init(),
            _ => tracing_subscriber::registry()
                .with(filter)
                .with(layer.pretty())
                .init(),
        }

        tracing::info!(level, format = get_log_format(), "Logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("YES"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(None, false), "warn");
        assert_eq!(resolve_level(None, true), "debug");
        assert_eq!(resolve_level(Some("INFO"), false), "info");
        assert_eq!(resolve_level(Some("verbose"), true), "debug");
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None), "json");
        assert_eq!(resolve_format(Some("Pretty")), "pretty");
        assert_eq!(resolve_format(Some("compact")), "compact");
        assert_eq!(resolve_format(Some("xml")), "json");
    }

    #[test]
    fn test_directives_cover_every_crate() {
        assert_eq!(
            directives("debug"),
            "seangkatan_cli=debug,seangkatan_migrate=debug,seangkatan_mysql=debug"
        );
    }
}
