// src/engine/gate.rs

use std::time::Duration;

use tokio::time::Instant;

/// Outcome of asking the gate for a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Restart right away.
    RestartNow,
    /// A restart is scheduled for [`RestartGate::deadline`].
    Deferred,
}

/// Optional coalescing window for restart requests.
///
/// Without a window every request restarts immediately. With a window, the
/// first request opens it and schedules one restart at `first + window`;
/// requests arriving before that deadline fold into the same restart. The
/// window does not slide, so a steady stream of writes still restarts once
/// per window.
#[derive(Debug, Clone, Default)]
pub struct RestartGate {
    window: Option<Duration>,
    deadline: Option<Instant>,
}

impl RestartGate {
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            window: window.filter(|w| !w.is_zero()),
            deadline: None,
        }
    }

    pub fn request(&mut self, now: Instant) -> GateDecision {
        match self.window {
            None => GateDecision::RestartNow,
            Some(window) => {
                if self.deadline.is_none() {
                    self.deadline = Some(now + window);
                }
                GateDecision::Deferred
            }
        }
    }

    /// When the pending restart is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending restart if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending restart (e.g. because one just happened anyway).
    pub fn clear(&mut self) {
        self.deadline = None;
    }
}
