// src/engine/mod.rs

//! The event loop that drives amon.
//!
//! This module ties together:
//! - the watch set (structural changes)
//! - the supervisor (content changes → restart)
//! - the restart gate (optional coalescing window)
//! - operator control: `rs` on stdin and Ctrl-C

pub mod control;
pub mod gate;
pub mod runtime;

pub use control::{is_restart_command, spawn_ctrl_c_listener, spawn_stdin_listener, ControlEvent};
pub use gate::{GateDecision, RestartGate};
pub use runtime::{EventLoop, LoopOptions};
