// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

use crate::types::{RefreshStrategy, SpawnErrorPolicy};

/// Command-line arguments for `amon`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "amon",
    version,
    about = "Restart a command whenever files in a project change.",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run (and restart on every change).
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    pub command: Option<String>,

    /// Second command, started right after the first one on every cycle.
    ///
    /// An empty string means "no second command".
    #[arg(
        short = 'o',
        long = "other-command",
        alias = "otherCommand",
        value_name = "CMD"
    )]
    pub other_command: Option<String>,

    /// Directory to watch. Defaults to `watch.root` from the config file, or
    /// the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to a TOML config file.
    ///
    /// If omitted, `Amon.toml` in the current directory is used when present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra glob pattern to ignore (relative to the watch root). Repeatable.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Collapse restarts requested within this many milliseconds into one.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// How to pick up newly created directories ("full" or "targeted").
    #[arg(long, value_name = "STRATEGY", conflicts_with = "targeted_refresh")]
    pub refresh: Option<RefreshStrategy>,

    /// Shorthand for `--refresh targeted`.
    #[arg(long)]
    pub targeted_refresh: bool,

    /// What to do when a command cannot be spawned ("exit" or "continue").
    #[arg(long, value_name = "POLICY", conflicts_with = "keep_going")]
    pub on_spawn_error: Option<SpawnErrorPolicy>,

    /// Shorthand for `--on-spawn-error continue`.
    #[arg(long)]
    pub keep_going: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AMON_LOG` or a default level will be used.
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

/// Print the usage text to stdout.
pub fn print_usage() {
    let _ = CliArgs::command().print_help();
}
