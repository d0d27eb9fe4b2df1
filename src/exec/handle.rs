// src/exec/handle.rs

use tokio::sync::oneshot;

use crate::exec::spec::Slot;

/// Handle to one running process instance.
///
/// Each instance gets its own stop channel at spawn time. The task that owns
/// the process holds the receiving end and drops it once the process has
/// exited, so a closed channel means "no longer alive".
#[derive(Debug)]
pub struct ChildHandle {
    slot: Slot,
    pid: Option<u32>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl ChildHandle {
    pub fn new(slot: Slot, pid: Option<u32>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            slot,
            pid,
            stop_tx: Some(stop_tx),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn is_alive(&self) -> bool {
        self.stop_tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Ask for the process to be killed. Does not wait for it to exit.
    ///
    /// Returns `false` if the process had already exited or a stop was
    /// already requested; that case is not an error.
    pub fn request_stop(&mut self) -> bool {
        match self.stop_tx.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}
