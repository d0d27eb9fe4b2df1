// src/engine/control.rs

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Operator input that is not a filesystem change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// `rs` typed on stdin.
    ManualRestart,
    /// Ctrl-C.
    Shutdown,
}

/// True if `line` is the manual restart command.
pub fn is_restart_command(line: &str) -> bool {
    line.trim() == "rs"
}

/// Read stdin line by line and send `ManualRestart` for every `rs`.
pub fn spawn_stdin_listener(tx: mpsc::Sender<ControlEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if is_restart_command(&line) && tx.send(ControlEvent::ManualRestart).await.is_err() {
                break;
            }
        }
        debug!("stdin listener ended");
    });
}

/// Ctrl-C → `Shutdown`.
pub fn spawn_ctrl_c_listener(tx: mpsc::Sender<ControlEvent>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = tx.send(ControlEvent::Shutdown).await;
    });
}
