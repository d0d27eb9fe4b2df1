// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{RefreshStrategy, SpawnErrorPolicy};

/// Top-level configuration as read from `Amon.toml`.
///
/// ```toml
/// command = "cargo run"
/// other_command = "echo done"
///
/// [watch]
/// root = "."
/// exclude = ["target", "*.log"]
/// refresh = "full"
///
/// [restart]
/// debounce_ms = 0
/// on_spawn_error = "exit"
/// ```
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Primary command line.
    #[serde(default)]
    pub command: Option<String>,

    /// Secondary command line, started right after the primary one.
    #[serde(default)]
    pub other_command: Option<String>,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub restart: RestartSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    /// Watch root, relative to the directory holding the config file.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Glob patterns (relative to the root) that are never watched and never
    /// trigger a restart. A pattern matching a directory covers everything
    /// below it.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub refresh: RefreshStrategy,
}

/// `[restart]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestartSection {
    /// Coalescing window in milliseconds; `0` restarts on every write.
    #[serde(default)]
    pub debounce_ms: u64,

    #[serde(default)]
    pub on_spawn_error: SpawnErrorPolicy,
}
