// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod watch;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::engine::{
    spawn_ctrl_c_listener, spawn_stdin_listener, ControlEvent, EventLoop, LoopOptions,
};
use crate::errors::Result;
use crate::exec::{Supervisor, TokioProcessBackend};
use crate::watch::{NotifyWatcher, PathFilter, WatchSet};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// High-level entry point used by `main.rs`.
///
/// This wires together, in order:
/// - settings (CLI flags over the optional config file)
/// - the notifier and the initial watch set (any failure here is fatal and
///   happens before a single command is spawned)
/// - the supervisor, which starts the commands once
/// - stdin (`rs`) and Ctrl-C listeners
/// - the event loop, which runs until Ctrl-C
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::resolve(&args)?;

    let (notifier, streams) = NotifyWatcher::new()?;
    let filter = PathFilter::new(&settings.exclude)?;
    let mut watch_set = WatchSet::new(notifier, filter);
    watch_set.initialize(&settings.root)?;

    console::banner(watch_set.root());

    let mut supervisor = Supervisor::new(
        TokioProcessBackend::new(),
        &settings.commands,
        settings.on_spawn_error,
    );
    supervisor.start()?;

    let (control_tx, control_rx) = mpsc::channel::<ControlEvent>(8);
    spawn_ctrl_c_listener(control_tx.clone());
    spawn_stdin_listener(control_tx);

    let options = LoopOptions {
        debounce: settings.debounce,
        refresh: settings.refresh,
    };
    info!(?options, "starting event loop");

    let event_loop = EventLoop::new(watch_set, supervisor, streams, control_rx, options);
    event_loop.run().await?;

    // Kill requests are handled by background tasks; give them a moment
    // before `main` exits the process.
    tokio::time::sleep(SHUTDOWN_GRACE).await;
    Ok(())
}
