// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The supervisor talks to a `ProcessBackend` instead of spawning processes
//! itself, so tests can swap in a fake that records spawns and stop requests.

use crate::errors::Result;
use crate::exec::handle::ChildHandle;
use crate::exec::spec::{CommandLine, Slot};

pub trait ProcessBackend: Send {
    /// Start `line` for `slot` and return its handle.
    ///
    /// Must not wait for the process: output forwarding and reaping happen
    /// in the background.
    fn spawn(&mut self, slot: Slot, line: &CommandLine) -> Result<ChildHandle>;
}
