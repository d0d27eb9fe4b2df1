// src/watch/notifier.rs

use std::path::Path;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::errors::{AmonError, Result};
use crate::watch::event::{FsEvent, FsEventKind};

/// Something that can be told to observe a directory.
///
/// Registration is non-recursive: each directory that should be observed
/// must be registered on its own. Production code uses [`NotifyWatcher`];
/// tests provide a recording fake.
pub trait Notifier: Send {
    fn register(&mut self, path: &Path) -> Result<()>;
}

/// Receiving ends of the notifier: change events and asynchronous errors.
#[derive(Debug)]
pub struct NotifierStreams {
    pub events: mpsc::UnboundedReceiver<FsEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// [`Notifier`] backed by the platform's recommended `notify` watcher.
///
/// Dropping this stops file watching and eventually closes both streams.
pub struct NotifyWatcher {
    inner: RecommendedWatcher,
}

impl std::fmt::Debug for NotifyWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyWatcher").finish()
    }
}

impl NotifyWatcher {
    pub fn new() -> Result<(Self, NotifierStreams)> {
        let (event_tx, events) = mpsc::unbounded_channel::<FsEvent>();
        let (error_tx, errors) = mpsc::unbounded_channel::<notify::Error>();

        // Called synchronously on notify's own thread.
        let inner = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let kind = FsEventKind::from(&event.kind);
                for path in event.paths {
                    if event_tx.send(FsEvent { kind, path }).is_err() {
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = error_tx.send(err);
            }
        })
        .map_err(AmonError::NotifierInit)?;

        Ok((Self { inner }, NotifierStreams { events, errors }))
    }
}

impl Notifier for NotifyWatcher {
    fn register(&mut self, path: &Path) -> Result<()> {
        self.inner.watch(path, RecursiveMode::NonRecursive)?;
        Ok(())
    }
}
