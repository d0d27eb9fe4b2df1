// src/config/mod.rs

//! Configuration loading and validation for amon.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate the few things that can be wrong in it (`validate.rs`).
//! - Merge CLI flags over the file into the immutable [`Settings`] the rest
//!   of the program runs on (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{discover, load_from_path, DEFAULT_CONFIG_FILE};
pub use model::{ConfigFile, RestartSection, WatchSection};
pub use settings::Settings;
pub use validate::validate_config;
