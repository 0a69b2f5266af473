// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The interactive menu is the real interface; the flags here only point the
//! program at its config and pick a log level.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `duelist`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "duelist",
    version,
    about = "A task list that spreads tasks sharing a due date over the days before it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `<config dir>/duelist/config.toml`. A missing file means
    /// built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DUELIST_LOG`, then `[logging].level` from the config, then
    /// `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
