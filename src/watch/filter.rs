// src/watch/filter.rs

use std::fmt;
use std::path::{Component, Path};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{AmonError, Result};

/// First character of a hidden file or directory name.
pub const HIDDEN_MARKER: char = '.';

/// True if any normal segment of `rel` starts with [`HIDDEN_MARKER`].
///
/// `.` and `..` components are not names and never count as hidden.
pub fn is_hidden(rel: &Path) -> bool {
    rel.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with(HIDDEN_MARKER),
        _ => false,
    })
}

/// Decides whether a path (relative to the watch root) is ignored.
///
/// A path is ignored when it is hidden, or when it or any of its ancestors
/// matches one of the exclude globs. Excluding `target` therefore also
/// excludes `target/debug/foo`.
#[derive(Clone, Default)]
pub struct PathFilter {
    exclude: Option<GlobSet>,
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("exclude_patterns", &self.exclude.as_ref().map_or(0, GlobSet::len))
            .finish()
    }
}

impl PathFilter {
    /// Compile the exclude patterns. An empty list only filters hidden paths.
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                AmonError::Config(format!("invalid exclude pattern {pattern:?}: {e}"))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| AmonError::Config(format!("building exclude set: {e}")))?;

        Ok(Self { exclude: Some(set) })
    }

    pub fn is_ignored(&self, rel: &Path) -> bool {
        if is_hidden(rel) {
            return true;
        }

        let Some(set) = &self.exclude else {
            return false;
        };

        rel.ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .any(|p| set.is_match(slash_str(p)))
    }
}

/// Path as a string with forward slashes, so globs behave the same on
/// every platform.
fn slash_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
