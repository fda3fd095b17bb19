//! Unit tests for the host module.
//! Command-runner tests shell out to coreutils expected on any CI box.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::host::{
    ActionParams, CommandError, HostError, LocalHost, Model, Status, run_command,
};

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn run_command_captures_stdout() {
    let output = run_command(&argv(&["echo", "hello"]), Duration::from_secs(5))
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("hello"));
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn run_command_reports_nonzero_exit_as_output() {
    let output = run_command(
        &argv(&["ls", "/no-such-directory-for-sure"]),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert!(!output.success());
    assert_ne!(output.code, 0);
    assert!(!output.stderr.is_empty());
}

#[tokio::test]
async fn run_command_surfaces_spawn_failures() {
    let result = run_command(&argv(&["no-such-binary-for-sure"]), Duration::from_secs(5)).await;

    assert!(matches!(result, Err(CommandError::Spawn { .. })));
}

#[tokio::test]
async fn run_command_enforces_the_time_limit() {
    let result = run_command(&argv(&["sleep", "5"]), Duration::from_millis(100)).await;

    match result {
        Err(CommandError::Timeout { command, .. }) => assert_eq!(command, "sleep 5"),
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn run_command_rejects_an_empty_command_line() {
    let result = run_command(&[], Duration::from_secs(1)).await;

    assert!(matches!(result, Err(CommandError::EmptyCommandLine)));
}

#[test]
fn status_exposes_level_and_message() {
    let status = Status::Maintenance("Installation done".to_string());

    assert_eq!(status.level(), "maintenance");
    assert_eq!(status.message(), "Installation done");
    assert_eq!(status.to_string(), "maintenance: Installation done");

    assert_eq!(Status::Active(String::new()).level(), "active");
    assert_eq!(Status::Blocked(String::new()).level(), "blocked");
    assert_eq!(Status::Waiting(String::new()).level(), "waiting");
}

#[tokio::test]
async fn local_host_returns_the_configured_snapshot() {
    let mut snapshot = Map::new();
    snapshot.insert("message".to_string(), Value::String("hi".to_string()));
    let host = LocalHost::new().with_config(snapshot.clone());

    assert_eq!(host.config().await.unwrap(), snapshot);
}

#[tokio::test]
async fn local_host_records_statuses() {
    let host = LocalHost::new();

    host.set_status(Status::Active("Start".to_string()))
        .await
        .unwrap();

    assert_eq!(host.statuses(), vec![Status::Active("Start".to_string())]);
}

#[tokio::test]
async fn local_host_rejects_action_calls_outside_an_action() {
    let host = LocalHost::new();

    assert!(matches!(
        host.action_params().await,
        Err(HostError::NoAction { .. })
    ));
    assert!(matches!(
        host.set_action_results(Map::new()).await,
        Err(HostError::NoAction { .. })
    ));
    assert!(matches!(
        host.fail_action("boom").await,
        Err(HostError::NoAction { .. })
    ));
}

#[tokio::test]
async fn local_host_records_action_results_and_failures() {
    let mut params = ActionParams::new();
    params.insert("some".to_string(), json!("value"));
    let host = LocalHost::new().with_action_params(params.clone());

    assert_eq!(host.action_params().await.unwrap(), params);

    let mut results = Map::new();
    results.insert("buginfo".to_string(), json!("output"));
    host.set_action_results(results.clone()).await.unwrap();
    host.fail_action("did not work").await.unwrap();

    assert_eq!(host.results(), vec![results]);
    assert_eq!(host.failures(), vec!["did not work".to_string()]);
}
