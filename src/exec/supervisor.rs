// src/exec/supervisor.rs

use tracing::{debug, error, info};

use crate::console;
use crate::errors::Result;
use crate::exec::backend::ProcessBackend;
use crate::exec::handle::ChildHandle;
use crate::exec::spec::{CommandLine, CommandSpec, Slot};
use crate::types::SpawnErrorPolicy;

/// Lifecycle of one command slot.
///
/// `Idle -> Starting -> Running -> Stopping -> Idle`. `Stopping` ends as soon
/// as the kill request is issued, not when the process is confirmed dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Starting,
    Running,
    Stopping,
}

#[derive(Debug)]
struct SlotEntry {
    slot: Slot,
    line: CommandLine,
    state: SlotState,
    handle: Option<ChildHandle>,
}

impl SlotEntry {
    /// Issue the kill request for the current instance, if any.
    fn stop(&mut self) {
        let Some(mut handle) = self.handle.take() else {
            self.state = SlotState::Idle;
            return;
        };

        self.state = SlotState::Stopping;
        if handle.request_stop() {
            debug!(slot = %self.slot, pid = ?handle.pid(), "kill requested");
        } else {
            debug!(slot = %self.slot, pid = ?handle.pid(), "process already exited");
        }
        self.state = SlotState::Idle;
    }
}

/// Owns the running instances of the configured commands.
///
/// Every slot has at most one live instance: `start` stops whatever is still
/// running in a slot before spawning into it, and `restart` stops every slot
/// before starting any. Mutation happens only through `&mut self`, so the
/// owner (the event loop) serializes all transitions.
#[derive(Debug)]
pub struct Supervisor<B: ProcessBackend> {
    backend: B,
    policy: SpawnErrorPolicy,
    slots: Vec<SlotEntry>,
    restarts: u64,
}

impl<B: ProcessBackend> Supervisor<B> {
    pub fn new(backend: B, spec: &CommandSpec, policy: SpawnErrorPolicy) -> Self {
        let slots = spec
            .entries()
            .map(|(slot, line)| SlotEntry {
                slot,
                line: line.clone(),
                state: SlotState::Idle,
                handle: None,
            })
            .collect();

        Self {
            backend,
            policy,
            slots,
            restarts: 0,
        }
    }

    /// Spawn every configured command, primary first.
    ///
    /// The secondary is spawned as soon as the primary's spawn call returns,
    /// without waiting for the primary to exit.
    ///
    /// With [`SpawnErrorPolicy::Exit`] the first spawn failure is returned.
    /// With [`SpawnErrorPolicy::Continue`] it is reported, the slot stays
    /// idle, and the remaining slots are still started.
    ///
    /// Returns the handles of the instances now running, primary first.
    pub fn start(&mut self) -> Result<Vec<&ChildHandle>> {
        for entry in self.slots.iter_mut() {
            if entry.handle.is_some() {
                entry.stop();
            }

            entry.state = SlotState::Starting;
            console::starting(entry.slot, &entry.line);

            match self.backend.spawn(entry.slot, &entry.line) {
                Ok(handle) => {
                    entry.handle = Some(handle);
                    entry.state = SlotState::Running;
                }
                Err(err) => {
                    entry.state = SlotState::Idle;
                    match self.policy {
                        SpawnErrorPolicy::Exit => return Err(err),
                        SpawnErrorPolicy::Continue => {
                            error!(slot = %entry.slot, error = %err, "command failed to start");
                            console::spawn_failed(entry.slot, &err);
                        }
                    }
                }
            }
        }
        Ok(self.handles())
    }

    /// Request termination of every live instance. Never blocks, never fails.
    pub fn stop(&mut self) {
        for entry in self.slots.iter_mut() {
            entry.stop();
        }
    }

    /// Stop everything, then start everything. Returns the new handles.
    pub fn restart(&mut self) -> Result<Vec<&ChildHandle>> {
        self.restarts += 1;
        info!(restart = self.restarts, "restarting commands");
        self.stop();
        self.start()
    }

    /// Current state of `slot`, or `None` if it is not configured.
    ///
    /// A `Running` slot whose process has exited on its own reports `Idle`.
    pub fn state(&self, slot: Slot) -> Option<SlotState> {
        let entry = self.slots.iter().find(|e| e.slot == slot)?;
        match (&entry.state, &entry.handle) {
            (SlotState::Running, Some(handle)) if !handle.is_alive() => Some(SlotState::Idle),
            (state, _) => Some(*state),
        }
    }

    /// Handle of the current instance in `slot`, if one was spawned.
    pub fn handle(&self, slot: Slot) -> Option<&ChildHandle> {
        self.slots
            .iter()
            .find(|e| e.slot == slot)
            .and_then(|e| e.handle.as_ref())
    }

    /// Handles of every slot that currently has an instance, primary first.
    pub fn handles(&self) -> Vec<&ChildHandle> {
        self.slots.iter().filter_map(|e| e.handle.as_ref()).collect()
    }

    /// Number of `restart` calls so far.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
