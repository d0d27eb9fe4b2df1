// src/config/validate.rs

use crate::config::model::ConfigFile;
use crate::errors::{AmonError, Result};
use crate::watch::PathFilter;

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - every `watch.exclude` entry is a valid glob
/// - `watch.root`, when present, is not empty
///
/// A missing `command` is not an error here; the CLI may still provide one.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    PathFilter::new(&cfg.watch.exclude)?;

    if let Some(root) = &cfg.watch.root {
        if root.as_os_str().is_empty() {
            return Err(AmonError::Config(
                "[watch].root must not be empty".to_string(),
            ));
        }
    }

    Ok(())
}
