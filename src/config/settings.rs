// src/config/settings.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::{discover, load_from_path};
use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;
use crate::errors::{AmonError, Result};
use crate::exec::CommandSpec;
use crate::types::{RefreshStrategy, SpawnErrorPolicy};

/// Everything the supervisor needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub commands: CommandSpec,
    pub root: PathBuf,
    pub exclude: Vec<String>,
    pub refresh: RefreshStrategy,
    /// `None` means every qualifying write restarts immediately.
    pub debounce: Option<Duration>,
    pub on_spawn_error: SpawnErrorPolicy,
}

impl Settings {
    /// Resolve settings for a process started in the current directory.
    pub fn resolve(args: &CliArgs) -> Result<Settings> {
        let cwd = std::env::current_dir()?;
        Self::resolve_in(args, &cwd)
    }

    /// Resolve settings as if started from `cwd`.
    ///
    /// - `--config` must point at a readable file.
    /// - Without it, `cwd/Amon.toml` is used if present.
    /// - A relative `watch.root` is taken relative to the config file.
    pub fn resolve_in(args: &CliArgs, cwd: &Path) -> Result<Settings> {
        let config_path = match &args.config {
            Some(path) => Some(cwd.join(path)),
            None => discover(cwd),
        };

        let (file, base_dir) = match config_path {
            Some(path) => {
                info!(path = ?path, "loading config file");
                let file = load_from_path(&path).map_err(|err| load_error(&path, err))?;
                validate_config(&file)?;
                let base = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => cwd.to_path_buf(),
                };
                (file, base)
            }
            None => (ConfigFile::default(), cwd.to_path_buf()),
        };

        Self::merge(args, file, &base_dir, cwd)
    }

    /// Merge CLI flags over a config file. CLI values win.
    pub fn merge(
        args: &CliArgs,
        file: ConfigFile,
        config_dir: &Path,
        cwd: &Path,
    ) -> Result<Settings> {
        let primary = args.command.as_deref().or(file.command.as_deref());
        let secondary = args
            .other_command
            .as_deref()
            .or(file.other_command.as_deref());
        let commands = CommandSpec::new(primary, secondary)?;

        let root = match (&args.root, &file.watch.root) {
            (Some(cli_root), _) => cwd.join(cli_root),
            (None, Some(file_root)) => config_dir.join(file_root),
            (None, None) => cwd.to_path_buf(),
        };

        let mut exclude = file.watch.exclude;
        exclude.extend(args.exclude.iter().cloned());

        let refresh = args
            .refresh
            .or(args.targeted_refresh.then_some(RefreshStrategy::Targeted))
            .unwrap_or(file.watch.refresh);

        let debounce_ms = match args.debounce_ms {
            Some(ms) if ms > 0 => ms,
            _ => file.restart.debounce_ms,
        };
        let debounce = (debounce_ms > 0).then(|| Duration::from_millis(debounce_ms));

        let on_spawn_error = args
            .on_spawn_error
            .or(args.keep_going.then_some(SpawnErrorPolicy::Continue))
            .unwrap_or(file.restart.on_spawn_error);

        let settings = Settings {
            commands,
            root,
            exclude,
            refresh,
            debounce,
            on_spawn_error,
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }
}

/// Surface TOML syntax errors as [`AmonError::Toml`]; anything else (a
/// missing or unreadable file) keeps its `anyhow` context.
fn load_error(path: &Path, err: anyhow::Error) -> AmonError {
    match err.downcast::<toml::de::Error>() {
        Ok(source) => AmonError::Toml {
            path: path.to_path_buf(),
            source,
        },
        Err(err) => AmonError::Other(err),
    }
}
