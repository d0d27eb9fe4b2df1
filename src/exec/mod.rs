// src/exec/mod.rs

//! Process supervision layer.
//!
//! - [`spec`] parses the configured command lines.
//! - [`handle`] is the per-process handle the supervisor keeps.
//! - [`backend`] is the seam between the supervisor and real processes.
//! - [`process`] spawns real processes with `tokio::process::Command` and
//!   forwards their output.
//! - [`supervisor`] owns the command slots and implements start/stop/restart.

pub mod backend;
pub mod handle;
pub mod process;
pub mod spec;
pub mod supervisor;

pub use backend::ProcessBackend;
pub use handle::ChildHandle;
pub use process::TokioProcessBackend;
pub use spec::{CommandLine, CommandSpec, Slot};
pub use supervisor::{SlotState, Supervisor};
