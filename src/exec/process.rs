// src/exec/process.rs

use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::{AmonError, Result};
use crate::exec::backend::ProcessBackend;
use crate::exec::handle::ChildHandle;
use crate::exec::spec::{CommandLine, Slot};

/// Real backend: spawns OS processes with `tokio::process`.
///
/// - stdin is null, so the operator's keyboard input stays with `amon`.
/// - stdout and stderr are copied byte-for-byte to our own stdout/stderr by
///   two detached tasks that run until end-of-stream.
/// - a third task waits for either process exit or a stop request; on a stop
///   request it kills the process and reaps it.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessBackend;

impl TokioProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for TokioProcessBackend {
    fn spawn(&mut self, slot: Slot, line: &CommandLine) -> Result<ChildHandle> {
        debug!(%slot, cmd = %line, "spawning process");

        let mut cmd = Command::new(line.program());
        cmd.args(line.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| AmonError::Spawn {
            command: line.to_string(),
            source,
        })?;
        let pid = child.id();

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward(stdout, tokio::io::stdout(), slot, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward(stderr, tokio::io::stderr(), slot, "stderr"));
        }

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        tokio::spawn(watch_child(child, slot, stop_rx));

        info!(%slot, pid = ?pid, "process started");
        Ok(ChildHandle::new(slot, pid, stop_tx))
    }
}

/// Copy one output stream verbatim until the child closes it.
async fn forward<R, W>(mut reader: R, mut writer: W, slot: Slot, stream: &'static str)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match tokio::io::copy(&mut reader, &mut writer).await {
        Ok(bytes) => debug!(%slot, stream, bytes, "output stream closed"),
        Err(err) => debug!(%slot, stream, error = %err, "output forwarding stopped"),
    }
}

/// Own the child until it exits or is told to stop.
///
/// `stop_rx` is dropped when this returns, which is what
/// [`ChildHandle::is_alive`] observes.
async fn watch_child(mut child: Child, slot: Slot, mut stop_rx: oneshot::Receiver<()>) {
    let pid = child.id();

    tokio::select! {
        status = child.wait() => match status {
            Ok(status) => info!(%slot, pid = ?pid, code = ?status.code(), "process exited"),
            Err(err) => warn!(%slot, pid = ?pid, error = %err, "failed to wait for process"),
        },
        stop = &mut stop_rx => match stop {
            Ok(()) => {
                debug!(%slot, pid = ?pid, "stop requested; killing process");
                // `kill` also reaps; an error here means it already exited.
                if let Err(err) = child.kill().await {
                    debug!(%slot, pid = ?pid, error = %err, "kill failed; process already gone");
                }
            }
            Err(_) => {
                // Handle dropped without a stop request; kill_on_drop covers it.
                debug!(%slot, pid = ?pid, "handle dropped");
            }
        },
    }
}
