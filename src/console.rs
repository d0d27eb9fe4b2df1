// src/console.rs

//! `[amon]` status lines for the operator, printed on stdout alongside the
//! supervised commands' own output.

use std::path::Path;

use crate::exec::{CommandLine, Slot};

const PREFIX: &str = "[amon]";

pub fn banner(root: &Path) {
    println!("{PREFIX} {}", env!("CARGO_PKG_VERSION"));
    println!("{PREFIX} to restart at any time, enter `rs`");
    println!("{PREFIX} watching: {}", root.display());
}

/// Names the program only: arguments could echo the command's own output
/// text onto the console.
pub fn starting(slot: Slot, line: &CommandLine) {
    println!("{PREFIX} starting {slot} command `{}`", line.program());
}

pub fn restarting() {
    println!("{PREFIX} restarting due to changes...");
}

pub fn manual_restart() {
    println!("{PREFIX} restarting on request...");
}

pub fn spawn_failed(slot: Slot, err: &dyn std::fmt::Display) {
    println!("{PREFIX} {slot} command failed to start: {err}");
}

pub fn stopping() {
    println!("{PREFIX} stopping");
}
