// src/watch/mod.rs

//! Directory watching.
//!
//! This module is responsible for:
//! - Deciding which paths are ignored (hidden segments, exclude globs).
//! - Keeping the set of watched directories in sync with the tree on disk.
//! - Wiring up the filesystem notifier (`notify`) and turning its callbacks
//!   into two tokio streams: change events and watch errors.
//!
//! It does **not** know about commands; the engine decides what a change
//! means.

pub mod event;
pub mod filter;
pub mod notifier;
pub mod watch_set;

pub use event::{FsEvent, FsEventKind};
pub use filter::{is_hidden, PathFilter, HIDDEN_MARKER};
pub use notifier::{Notifier, NotifierStreams, NotifyWatcher};
pub use watch_set::WatchSet;
