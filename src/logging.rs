// src/logging.rs

//! Logging setup for `duelist` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `DUELIST_LOG` environment variable (e.g. "info", "debug")
//! 3. `[logging].level` from the config file
//! 4. default to `warn`, so the interactive prompt stays readable
//!
//! Logs go to STDERR, or to `[logging].file` when one is configured.
//!
//! The subscriber is installed with `set_default` and lives as long as the
//! returned [`LogGuard`], which `main` holds for the whole session. While
//! the config file is still being read, [`init_bootstrap_logging`] covers
//! the gap using only the CLI flag and the environment.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;
use crate::config::model::{expand_home, LoggingSection};

/// Keeps the session's subscriber installed until dropped.
#[must_use = "logging stops when the guard is dropped"]
pub struct LogGuard {
    _guard: DefaultGuard,
}

/// Build the subscriber and make it the default for the current thread.
pub fn init_logging(cli_level: Option<LogLevel>, section: &LoggingSection) -> Result<LogGuard> {
    let level = resolve_level(
        cli_level,
        std::env::var("DUELIST_LOG").ok().as_deref(),
        section.level.as_deref(),
    );

    let guard = match &section.file {
        Some(path) => {
            let path = expand_home(path);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {:?}", path))?;
            let subscriber = fmt()
                .with_max_level(level)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_default(subscriber)
        }
        None => {
            let subscriber = fmt()
                .with_max_level(level)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }
    };

    Ok(LogGuard { _guard: guard })
}

/// Stderr logger for the config-loading phase, before `[logging]` is known.
pub fn init_bootstrap_logging(cli_level: Option<LogLevel>) -> Result<LogGuard> {
    init_logging(cli_level, &LoggingSection::default())
}

/// Pick the effective level from the CLI flag, env var and config value.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    env_level: Option<&str>,
    config_level: Option<&str>,
) -> tracing::Level {
    if let Some(lvl) = cli_level {
        return level_from_log_level(lvl);
    }
    env_level
        .and_then(parse_level_str)
        .or_else(|| config_level.and_then(parse_level_str))
        .unwrap_or(tracing::Level::WARN)
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

pub(crate) fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
