use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Set to `json` for JSON lines, `text` for human-readable output.
pub const LOG_FORMAT_ENV: &str = "FUNNELSCOPE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Initialize the logging system with environment-based filtering.
///
/// - Log level comes from `RUST_LOG` (defaults to "info")
/// - Events go to stderr; stdout carries the report only
/// - JSON output flattens event fields
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    match default_log_format() {
        LogFormat::Json => builder.json().flatten_event(true).init(),
        LogFormat::Text => builder
            .with_target(false)
            .with_ansi(io::stderr().is_terminal())
            .init(),
    }
}

pub fn default_log_format() -> LogFormat {
    log_format_from(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
}

pub fn log_format_from(value: Option<&str>) -> LogFormat {
    match value {
        Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
