#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{fmt, EnvFilter};

use amon::errors::{AmonError, Result};
use amon::exec::{ChildHandle, CommandLine, ProcessBackend, Slot};
use amon::watch::{FsEvent, FsEventKind, Notifier, NotifierStreams};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// Enable levels with e.g. `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Notifier that records every registration instead of watching anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    registered: Arc<Mutex<Vec<PathBuf>>>,
    failing: Arc<Mutex<HashSet<PathBuf>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> Vec<PathBuf> {
        self.registered.lock().unwrap().clone()
    }

    /// Make registration of `path` fail until [`Self::heal`] is called.
    pub fn fail_on(&self, path: &Path) {
        self.failing.lock().unwrap().insert(path.to_path_buf());
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn register(&mut self, path: &Path) -> Result<()> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(notify::Error::generic("watch limit reached").into());
        }
        self.registered.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// What the fake backend observed, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Spawned { slot: Slot, instance: usize },
    /// The stop request for this instance had been issued by the time the
    /// backend next looked (at the following spawn or on inspection).
    StopSeen { slot: Slot, instance: usize },
}

struct FakeInstance {
    slot: Slot,
    instance: usize,
    rx: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct FakeState {
    log: Vec<Record>,
    instances: Vec<FakeInstance>,
    violations: Vec<String>,
    failing: HashSet<Slot>,
    one_shot: HashSet<Slot>,
}

impl FakeState {
    fn sweep(&mut self) {
        for inst in self.instances.iter_mut() {
            if let Some(rx) = inst.rx.as_mut() {
                if rx.try_recv().is_ok() {
                    inst.rx = None;
                    self.log.push(Record::StopSeen {
                        slot: inst.slot,
                        instance: inst.instance,
                    });
                }
            }
        }
    }
}

/// Process backend that spawns nothing and records everything.
///
/// Every spawn checks that no earlier instance of the same slot is still
/// "alive" (holding an un-signalled stop channel); offences are collected in
/// [`FakeBackend::violations`].
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances in `slot` exit on their own right after spawning.
    pub fn one_shot(self, slot: Slot) -> Self {
        self.state.lock().unwrap().one_shot.insert(slot);
        self
    }

    /// Spawns in `slot` fail from now on.
    pub fn fail_spawns(&self, slot: Slot) {
        self.state.lock().unwrap().failing.insert(slot);
    }

    pub fn log(&self) -> Vec<Record> {
        let mut state = self.state.lock().unwrap();
        state.sweep();
        state.log.clone()
    }

    pub fn spawned(&self, slot: Slot) -> usize {
        self.log()
            .iter()
            .filter(|r| matches!(r, Record::Spawned { slot: s, .. } if *s == slot))
            .count()
    }

    /// Instance numbers in `slot` that received a stop request.
    pub fn stopped(&self, slot: Slot) -> Vec<usize> {
        self.log()
            .iter()
            .filter_map(|r| match r {
                Record::StopSeen { slot: s, instance } if *s == slot => Some(*instance),
                _ => None,
            })
            .collect()
    }

    pub fn violations(&self) -> Vec<String> {
        self.state.lock().unwrap().violations.clone()
    }
}

impl ProcessBackend for FakeBackend {
    fn spawn(&mut self, slot: Slot, line: &CommandLine) -> Result<ChildHandle> {
        let mut state = self.state.lock().unwrap();
        state.sweep();

        if state.failing.contains(&slot) {
            return Err(AmonError::Spawn {
                command: line.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
            });
        }

        let alive: Vec<usize> = state
            .instances
            .iter()
            .filter(|i| i.slot == slot && i.rx.is_some())
            .map(|i| i.instance)
            .collect();
        if !alive.is_empty() {
            state
                .violations
                .push(format!("{slot} spawned while instances {alive:?} still alive"));
        }

        let instance = state.instances.iter().filter(|i| i.slot == slot).count() + 1;
        let (tx, rx) = oneshot::channel::<()>();
        let rx = if state.one_shot.contains(&slot) {
            drop(rx);
            None
        } else {
            Some(rx)
        };

        state.instances.push(FakeInstance { slot, instance, rx });
        state.log.push(Record::Spawned { slot, instance });

        Ok(ChildHandle::new(slot, Some(10_000 + instance as u32), tx))
    }
}

/// Senders for hand-fed notifier streams.
pub struct FeedStreams {
    pub events: mpsc::UnboundedSender<FsEvent>,
    pub errors: mpsc::UnboundedSender<notify::Error>,
}

impl FeedStreams {
    pub fn send(&self, kind: FsEventKind, path: impl Into<PathBuf>) {
        self.events
            .send(FsEvent::new(kind, path))
            .expect("event loop dropped its receiver");
    }
}

pub fn fed_streams() -> (FeedStreams, NotifierStreams) {
    let (events_tx, events) = mpsc::unbounded_channel();
    let (errors_tx, errors) = mpsc::unbounded_channel();
    (
        FeedStreams {
            events: events_tx,
            errors: errors_tx,
        },
        NotifierStreams { events, errors },
    )
}
