// src/errors.rs

//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no command to run; pass --command or set `command` in the config file")]
    MissingCommand,

    #[error("cannot watch {path:?}: {reason}")]
    WatchInit { path: PathBuf, reason: String },

    #[error("failed to create file watcher: {0}")]
    NotifierInit(#[source] notify::Error),

    #[error("file watch error: {0}")]
    Notify(#[from] notify::Error),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AmonError>;
