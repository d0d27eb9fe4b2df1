use std::time::Duration;

use tokio::time::Instant;

use amon::engine::{is_restart_command, GateDecision, RestartGate};

#[test]
fn without_a_window_every_request_restarts_now() {
    let mut gate = RestartGate::new(None);
    let now = Instant::now();

    assert_eq!(gate.request(now), GateDecision::RestartNow);
    assert_eq!(gate.request(now), GateDecision::RestartNow);
    assert_eq!(gate.deadline(), None);
}

#[test]
fn zero_window_behaves_like_no_window() {
    let mut gate = RestartGate::new(Some(Duration::ZERO));
    assert_eq!(gate.request(Instant::now()), GateDecision::RestartNow);
}

#[test]
fn window_is_fixed_from_the_first_request() {
    let window = Duration::from_millis(200);
    let mut gate = RestartGate::new(Some(window));
    let t0 = Instant::now();

    assert_eq!(gate.request(t0), GateDecision::Deferred);
    assert_eq!(gate.request(t0 + Duration::from_millis(150)), GateDecision::Deferred);
    assert_eq!(gate.deadline(), Some(t0 + window));

    assert!(!gate.take_due(t0 + Duration::from_millis(199)));
    assert!(gate.take_due(t0 + window));
    assert!(!gate.take_due(t0 + window));
    assert_eq!(gate.deadline(), None);

    // The next request opens a new window.
    let t1 = t0 + Duration::from_secs(1);
    assert_eq!(gate.request(t1), GateDecision::Deferred);
    assert_eq!(gate.deadline(), Some(t1 + window));

    gate.clear();
    assert_eq!(gate.deadline(), None);
}

#[test]
fn only_rs_is_a_restart_command() {
    assert!(is_restart_command("rs"));
    assert!(is_restart_command("  rs\n"));
    assert!(!is_restart_command("rs now"));
    assert!(!is_restart_command(""));
}
