// src/logging.rs

//! `tracing` subscriber for the `filewatch` binary.
//!
//! The level comes from `--log-level`, else from `FILEWATCH_LOG`, else
//! `info`. An unrecognised `FILEWATCH_LOG` value is ignored. Output goes to
//! stderr so stdout carries nothing but the `changed:` lines.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "FILEWATCH_LOG";

/// Install the global subscriber. Call once, before the watcher starts.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

/// Pick the effective level from the CLI flag and the raw env value.
pub fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Level {
    if let Some(lvl) = cli_level {
        return Level::from(lvl);
    }
    env_value.and_then(level_from_env).unwrap_or(Level::INFO)
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn level_from_env(value: &str) -> Option<Level> {
    // `tracing::Level` parses names case-insensitively; "warning" is accepted
    // as well because it is a common spelling in other tools' env vars.
    let value = value.trim();
    if value.eq_ignore_ascii_case("warning") {
        return Some(Level::WARN);
    }
    value.parse().ok()
}
