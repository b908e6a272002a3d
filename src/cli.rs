// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `filewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "filewatch",
    version,
    about = "Print a line every time a file is saved, whatever the editor.",
    long_about = None
)]
pub struct CliArgs {
    /// File to watch. Overrides `[watch].file` from the config.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to a config file (TOML).
    ///
    /// If omitted, `Filewatch.toml` is used when it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Capacity of the change-signal channel.
    #[arg(long, value_name = "N")]
    pub channel_capacity: Option<usize>,

    /// Stop after the first watcher failure instead of respawning.
    #[arg(long)]
    pub no_respawn: bool,

    /// Pause before respawning a failed watcher, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub respawn_delay_ms: Option<u64>,

    /// Total number of watcher runs allowed, the first one included.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FILEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
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
