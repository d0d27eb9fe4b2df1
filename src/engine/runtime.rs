// src/engine/runtime.rs

use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, trace, warn};

use crate::console;
use crate::engine::control::ControlEvent;
use crate::engine::gate::{GateDecision, RestartGate};
use crate::errors::Result;
use crate::exec::{ProcessBackend, Supervisor};
use crate::types::RefreshStrategy;
use crate::watch::{FsEvent, FsEventKind, Notifier, NotifierStreams, WatchSet};

/// Options that influence how the loop reacts to changes.
#[derive(Debug, Clone, Default)]
pub struct LoopOptions {
    /// Coalescing window for restarts; `None` restarts on every write.
    pub debounce: Option<Duration>,
    pub refresh: RefreshStrategy,
}

/// The single control point of amon.
///
/// Responsibilities:
/// - Consume filesystem events in arrival order.
/// - Creation → grow the watch set.
/// - Write to a non-ignored path → restart the commands.
/// - Removal/rename → nothing; stale watch entries are tolerated.
/// - Notifier errors → log and carry on.
/// - `rs` → immediate restart; Ctrl-C → stop the commands and return.
///
/// The watch set and the supervisor are owned here and only mutated from
/// this loop, so no locking is involved.
pub struct EventLoop<N: Notifier, B: ProcessBackend> {
    watch_set: WatchSet<N>,
    supervisor: Supervisor<B>,
    events: mpsc::UnboundedReceiver<FsEvent>,
    errors: mpsc::UnboundedReceiver<notify::Error>,
    control: mpsc::Receiver<ControlEvent>,
    gate: RestartGate,
    refresh: RefreshStrategy,
}

impl<N: Notifier, B: ProcessBackend> EventLoop<N, B> {
    pub fn new(
        watch_set: WatchSet<N>,
        supervisor: Supervisor<B>,
        streams: NotifierStreams,
        control: mpsc::Receiver<ControlEvent>,
        options: LoopOptions,
    ) -> Self {
        Self {
            watch_set,
            supervisor,
            events: streams.events,
            errors: streams.errors,
            control,
            gate: RestartGate::new(options.debounce),
            refresh: options.refresh,
        }
    }

    /// Main event loop.
    ///
    /// Runs until Ctrl-C, or until every input has closed and no deferred
    /// restart is pending. Returns the loop's parts so callers (mostly tests)
    /// can inspect the final state.
    ///
    /// Fails only when a restart hits a spawn error under
    /// [`SpawnErrorPolicy::Exit`](crate::types::SpawnErrorPolicy::Exit).
    pub async fn run(mut self) -> Result<(WatchSet<N>, Supervisor<B>)> {
        info!(root = ?self.watch_set.root(), "event loop started");

        loop {
            let deadline = self.gate.deadline();

            tokio::select! {
                Some(event) = self.events.recv() => self.handle_fs_event(event)?,
                Some(err) = self.errors.recv() => self.handle_notify_error(err),
                Some(control) = self.control.recv() => {
                    if !self.handle_control(control)? {
                        break;
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if self.gate.take_due(Instant::now()) {
                        console::restarting();
                        self.supervisor.restart()?;
                    }
                }
                else => break,
            }
        }

        info!("event loop finished");
        Ok((self.watch_set, self.supervisor))
    }

    fn handle_fs_event(&mut self, event: FsEvent) -> Result<()> {
        trace!(?event, "filesystem event");

        match event.kind {
            FsEventKind::Created => self.handle_created(&event.path),
            FsEventKind::Written => {
                if self.watch_set.is_ignored(&event.path) {
                    trace!(path = ?event.path, "ignored path written");
                    return Ok(());
                }
                self.request_restart(&event.path)?;
            }
            FsEventKind::Removed | FsEventKind::Renamed | FsEventKind::Other => {}
        }
        Ok(())
    }

    /// Make sure a newly created directory (and anything already inside it)
    /// is watched before the next event is handled.
    fn handle_created(&mut self, path: &Path) {
        if self.watch_set.is_ignored(path) {
            return;
        }

        let result = match self.refresh {
            RefreshStrategy::Full => self.watch_set.refresh(),
            RefreshStrategy::Targeted => self.watch_set.register_tree(path),
        };

        match result {
            Ok(0) => {}
            Ok(added) => debug!(path = ?path, added, "watch set grew"),
            Err(err) => warn!(path = ?path, error = %err, "failed to refresh watch set"),
        }
    }

    fn request_restart(&mut self, path: &Path) -> Result<()> {
        match self.gate.request(Instant::now()) {
            GateDecision::RestartNow => {
                debug!(path = ?path, "change detected");
                console::restarting();
                self.supervisor.restart()?;
                Ok(())
            }
            GateDecision::Deferred => {
                debug!(path = ?path, deadline = ?self.gate.deadline(), "restart deferred");
                Ok(())
            }
        }
    }

    fn handle_notify_error(&mut self, err: notify::Error) {
        warn!(error = %err, "file watch error");
    }

    /// Returns `false` when the loop should stop.
    fn handle_control(&mut self, control: ControlEvent) -> Result<bool> {
        match control {
            ControlEvent::ManualRestart => {
                self.gate.clear();
                console::manual_restart();
                self.supervisor.restart()?;
                Ok(true)
            }
            ControlEvent::Shutdown => {
                info!("shutdown requested, stopping commands");
                console::stopping();
                self.supervisor.stop();
                Ok(false)
            }
        }
    }
}
