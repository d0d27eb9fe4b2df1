#![cfg(unix)]

use std::error::Error;
use std::process::{Command, Output, Stdio};
use std::thread::sleep;
use std::time::Duration;

type TestResult = Result<(), Box<dyn Error>>;

fn amon() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_amon"));
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_remove("AMON_LOG");
    cmd
}

/// Run until `after`, then kill and collect whatever was printed.
fn run_for(mut cmd: Command, after: Duration) -> Result<(Output, bool), Box<dyn Error>> {
    let mut child = cmd.spawn()?;
    sleep(after);
    let still_running = child.try_wait()?.is_none();
    if still_running {
        child.kill()?;
    }
    Ok((child.wait_with_output()?, still_running))
}

#[test]
fn command_output_is_forwarded_once_at_startup() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut cmd = amon();
    cmd.current_dir(dir.path())
        .args(["--log-level", "warn", "-c", "echo hello"]);

    let (output, still_running) = run_for(cmd, Duration::from_millis(1500))?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(still_running, "amon exited early: {stdout}");
    assert_eq!(stdout.matches("hello").count(), 1, "stdout was: {stdout}");
    assert!(stdout.contains("[amon] watching:"));
    assert!(stdout.contains("[amon] starting primary command `echo`"), "stdout was: {stdout}");
    Ok(())
}

#[test]
fn missing_command_prints_usage_and_exits_with_one() -> TestResult {
    let dir = tempfile::tempdir()?;
    let output = amon().current_dir(dir.path()).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
    Ok(())
}

#[test]
fn missing_root_is_fatal() -> TestResult {
    let dir = tempfile::tempdir()?;
    let output = amon()
        .current_dir(dir.path())
        .args(["--root", "does/not/exist", "-c", "echo hello"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    // Nothing is spawned before the watch set is in place.
    assert!(!String::from_utf8_lossy(&output.stdout).contains("hello"));
    Ok(())
}

#[test]
fn unspawnable_command_is_fatal_by_default() -> TestResult {
    let dir = tempfile::tempdir()?;
    let output = amon()
        .current_dir(dir.path())
        .args(["-c", "amon-test-no-such-program"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to spawn"));
    Ok(())
}

#[test]
fn keep_going_survives_an_unspawnable_command() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut cmd = amon();
    cmd.current_dir(dir.path())
        .args(["--keep-going", "-c", "amon-test-no-such-program"]);

    let (output, still_running) = run_for(cmd, Duration::from_millis(800))?;

    assert!(still_running);
    assert!(String::from_utf8_lossy(&output.stdout).contains("failed to start"));
    Ok(())
}

#[test]
fn config_file_in_working_directory_supplies_the_command() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("Amon.toml"),
        "command = \"echo from-config\"\n",
    )?;
    let mut cmd = amon();
    cmd.current_dir(dir.path()).args(["--log-level", "warn"]);

    let (output, still_running) = run_for(cmd, Duration::from_millis(1500))?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(still_running, "amon exited early: {stdout}");
    assert_eq!(stdout.matches("from-config").count(), 1, "stdout was: {stdout}");
    Ok(())
}
