// src/logging.rs

//! Logging setup for `amon` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` (one level for everything)
//! 2. `AMON_LOG`, which takes full `EnvFilter` directives such as
//!    `amon=debug,notify=warn`
//! 3. `info`
//!
//! Logs go to STDERR; STDOUT carries the supervised commands' output and the
//! `[amon]` status lines.

use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;
use crate::errors::{AmonError, Result};

/// Environment variable read when `--log-level` is absent.
pub const LOG_ENV: &str = "AMON_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = log_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AmonError::Other(anyhow::Error::msg(err)))
}

/// Build the filter from the CLI level and the raw `AMON_LOG` value.
///
/// Unparseable directives fall back to `info` rather than failing startup.
pub fn log_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
