// src/watch/watch_set.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::errors::{AmonError, Result};
use crate::watch::filter::PathFilter;
use crate::watch::notifier::Notifier;

/// The set of directories registered with the notifier.
///
/// - Only directories are registered, never files.
/// - Ignored directories (see [`PathFilter`]) and everything below them are
///   never registered.
/// - The set only grows. Deleted directories stay in it; the notifier drops
///   their watches on its own.
#[derive(Debug)]
pub struct WatchSet<N: Notifier> {
    notifier: N,
    filter: PathFilter,
    root: PathBuf,
    dirs: BTreeSet<PathBuf>,
}

impl<N: Notifier> WatchSet<N> {
    pub fn new(notifier: N, filter: PathFilter) -> Self {
        Self {
            notifier,
            filter,
            root: PathBuf::new(),
            dirs: BTreeSet::new(),
        }
    }

    /// Walk the tree under `root` and register every non-ignored directory.
    ///
    /// Fails if `root` does not exist, is not a readable directory, or cannot
    /// itself be registered. Unreadable or unregistrable subdirectories are
    /// logged and skipped; a later [`refresh`](Self::refresh) retries them.
    pub fn initialize(&mut self, root: &Path) -> Result<()> {
        let root = root.canonicalize().map_err(|e| AmonError::WatchInit {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !root.is_dir() {
            return Err(AmonError::WatchInit {
                path: root,
                reason: "not a directory".to_string(),
            });
        }
        self.root = root;

        let dirs = self.scan(&self.root)?;
        for dir in dirs {
            match self.add(&dir) {
                Ok(_) => {}
                Err(err) if dir == self.root => {
                    return Err(AmonError::WatchInit {
                        path: dir,
                        reason: err.to_string(),
                    });
                }
                Err(err) => warn!(dir = ?dir, error = %err, "failed to watch directory"),
            }
        }

        info!(root = ?self.root, dirs = self.dirs.len(), "watch set initialized");
        Ok(())
    }

    /// Re-walk from the root and register any directory not yet watched.
    ///
    /// Idempotent: already-registered directories are skipped without
    /// touching the notifier. Returns how many directories were added.
    pub fn refresh(&mut self) -> Result<usize> {
        let dirs = self.scan(&self.root)?;
        let added = self.add_all(dirs);
        debug!(added, total = self.dirs.len(), "watch set refreshed");
        Ok(added)
    }

    /// Register `path` and the directories below it, if it is a directory
    /// under the root that is not ignored.
    ///
    /// This is the cheap alternative to [`refresh`](Self::refresh) for a
    /// single creation event. Returns how many directories were added.
    pub fn register_tree(&mut self, path: &Path) -> Result<usize> {
        if !path.is_dir() || self.is_ignored(path) {
            return Ok(0);
        }

        let dirs = self.scan(path)?;
        let added = self.add_all(dirs);
        debug!(path = ?path, added, "registered new subtree");
        Ok(added)
    }

    /// True if `path` must not be watched and must not trigger restarts.
    ///
    /// Hidden segments are looked for below the root only, so a root that
    /// itself lives inside a dot-directory still works.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.filter.is_ignored(rel)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Collect every non-ignored directory under `start` (inclusive).
    ///
    /// Failing to read `start` itself is an error; failures deeper down are
    /// logged and that branch is skipped.
    fn scan(&self, start: &Path) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(start)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_ignored(entry.path()));

        let mut dirs = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => dirs.push(entry.into_path()),
                Ok(_) => {}
                Err(err) if err.depth() == 0 => {
                    return Err(AmonError::WatchInit {
                        path: start.to_path_buf(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => warn!(error = %err, "skipping unreadable path during walk"),
            }
        }
        Ok(dirs)
    }

    fn add_all(&mut self, dirs: Vec<PathBuf>) -> usize {
        let mut added = 0;
        for dir in dirs {
            match self.add(&dir) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(err) => warn!(dir = ?dir, error = %err, "failed to watch directory"),
            }
        }
        added
    }

    /// Register one directory. `Ok(false)` if it was already watched.
    fn add(&mut self, dir: &Path) -> Result<bool> {
        if self.dirs.contains(dir) {
            return Ok(false);
        }
        self.notifier.register(dir)?;
        self.dirs.insert(dir.to_path_buf());
        debug!(dir = ?dir, "watching directory");
        Ok(true)
    }
}
