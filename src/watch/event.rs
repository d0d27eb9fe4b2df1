// src/watch/event.rs

use std::path::PathBuf;

use notify::event::ModifyKind;
use notify::EventKind;

/// The subset of change kinds the event loop distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    Created,
    Written,
    Removed,
    Renamed,
    /// Access, metadata-only changes and anything else the backend reports.
    Other,
}

impl From<&EventKind> for FsEventKind {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => FsEventKind::Created,
            EventKind::Modify(ModifyKind::Name(_)) => FsEventKind::Renamed,
            EventKind::Modify(ModifyKind::Metadata(_)) => FsEventKind::Other,
            EventKind::Modify(_) => FsEventKind::Written,
            EventKind::Remove(_) => FsEventKind::Removed,
            _ => FsEventKind::Other,
        }
    }
}

/// One change notification for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
}

impl FsEvent {
    pub fn new(kind: FsEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}
