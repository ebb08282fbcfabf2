//! Subprocess tests against stub `copilot` executables.
//!
//! Each test writes a small shell script into a temp directory and points the
//! adapter at it, so the spawn / capture / timeout paths run for real without
//! the Copilot CLI installed.

#![cfg(unix)]

use copilot_adapter::{CopilotCli, CopilotConfig, CopilotError};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn stub(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("copilot");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

#[tokio::test]
async fn session_returns_stdout_reply() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(
        &dir,
        r#"echo '```json'
echo '{"version":1,"title":"Fix bug","prompt":"There is a bug"}'
echo '```'"#,
    );

    let cli = CopilotCli::new(path);
    let mut session = cli.open_session("persona").expect("open session");
    let reply = session.ask(r#"{"message":"There is a bug"}"#).await.expect("ask");
    session.close().expect("close");

    let reply = reply.expect("reply content");
    assert!(reply.starts_with("```json\n{\"version\":1"), "reply was: {reply}");
    assert!(reply.ends_with("```"));
}

#[tokio::test]
async fn session_passes_persona_and_message_in_prompt() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(&dir, r#"printf '%s\n' "$@""#);

    let cli = CopilotCli::new(path).with_config(CopilotConfig {
        model: Some("gpt-4.1".to_string()),
        ..CopilotConfig::default()
    });
    let mut session = cli.open_session("Be a summariser.").expect("open session");
    let reply = session
        .ask(r#"{"message":"hello"}"#)
        .await
        .expect("ask")
        .expect("args echoed");
    session.close().expect("close");

    let lines: Vec<&str> = reply.lines().collect();
    assert_eq!(lines[0], "--prompt");
    assert_eq!(lines[1], "System: Be a summariser.");
    assert!(lines.contains(&r#"User: {"message":"hello"}"#), "reply was: {reply}");
    assert!(lines.windows(2).any(|w| w[0] == "--model" && w[1] == "gpt-4.1"));
}

#[tokio::test]
async fn session_runs_inside_its_workspace() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(&dir, "pwd");

    let cli = CopilotCli::new(path);
    let mut session = cli.open_session("").expect("open session");
    let workspace = session.workspace().expect("workspace").canonicalize().expect("canonical");
    let reply = session.ask("hi").await.expect("ask").expect("pwd output");
    session.close().expect("close");

    assert_eq!(PathBuf::from(reply.trim()).canonicalize().expect("canonical"), workspace);
}

#[tokio::test]
async fn blank_output_is_no_content() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(&dir, "echo '   '");

    let cli = CopilotCli::new(path);
    let mut session = cli.open_session("persona").expect("open session");
    let reply = session.ask("hi").await.expect("ask");
    session.close().expect("close");

    assert_eq!(reply, None);
}

#[tokio::test]
async fn invalid_utf8_does_not_drop_the_reply() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(
        &dir,
        r#"printf 'Voil\351:\n{"version":1,"title":"t","prompt":"p"}\n'"#,
    );

    let cli = CopilotCli::new(path);
    let mut session = cli.open_session("persona").expect("open session");
    let reply = session.ask("hi").await.expect("ask");
    session.close().expect("close");

    let reply = reply.expect("reply content");
    assert_eq!(
        reply,
        "Voil\u{FFFD}:\n{\"version\":1,\"title\":\"t\",\"prompt\":\"p\"}"
    );
}

#[tokio::test]
async fn non_zero_exit_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(&dir, "echo 'not authenticated' >&2\nexit 7");

    let err = CopilotCli::new(path).run("hi").await.unwrap_err();

    match err {
        CopilotError::NonZeroExit {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, 7);
            assert_eq!(stderr, "not authenticated");
        }
        other => panic!("expected NonZeroExit, got {other}"),
    }
}

#[tokio::test]
async fn slow_process_times_out() {
    let dir = TempDir::new().expect("temp dir");
    let path = stub(&dir, "echo started\nexec sleep 30");

    let cli = CopilotCli::new(path).with_config(CopilotConfig {
        timeout: Duration::from_millis(300),
        ..CopilotConfig::default()
    });
    let err = cli.run("hi").await.unwrap_err();

    match err {
        CopilotError::Timeout {
            elapsed,
            partial_stdout,
            ..
        } => {
            assert!(elapsed < Duration::from_secs(5));
            assert_eq!(partial_stdout, "started");
        }
        other => panic!("expected Timeout, got {other}"),
    }
}

#[tokio::test]
async fn missing_binary_fails_to_spawn() {
    let err = CopilotCli::new(PathBuf::from("/nonexistent/copilot"))
        .run("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, CopilotError::SpawnFailed { ref stage, .. } if stage == "spawn"));
}
