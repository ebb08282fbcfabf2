//! Subprocess execution and lifecycle management for the Copilot CLI.

use crate::error::CopilotError;
use crate::types::{CopilotConfig, RunResult};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinSet;
use tokio::time::timeout;

const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024; // 10 MB
const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Which pipe a reader task drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Lines captured from one pipe, total byte count, and whether the limit was hit.
struct Drained {
    pipe: Pipe,
    lines: Vec<String>,
    bytes: usize,
    truncated: bool,
}

/// Captured stdout, captured stderr, and exit status.
type CollectedOutput = (String, String, ExitStatus);

/// Spawns the Copilot CLI with `prompt` and waits for it to finish.
///
/// # Errors
/// Returns a [`CopilotError`] if the process cannot be spawned, times out,
/// exits unsuccessfully, or produces more output than the capture limit.
pub async fn run_copilot(
    path: &std::path::Path,
    prompt: &str,
    config: &CopilotConfig,
) -> Result<RunResult, CopilotError> {
    let args = crate::cmd::build_args(prompt, config);
    let start_time = Instant::now();

    let mut child = spawn_child(path, &args, config)?;

    let stdout = child.stdout.take().ok_or(CopilotError::NoStdout)?;
    let stderr = child.stderr.take().ok_or(CopilotError::NoStderr)?;
    let pid = child.id().ok_or(CopilotError::NoPid)?;
    tracing::debug!(pid, binary = %path.display(), "Spawned copilot subprocess");

    let mut tasks = JoinSet::new();
    tasks.spawn(drain_stream_bounded(stdout, Pipe::Stdout));
    tasks.spawn(drain_stream_bounded(stderr, Pipe::Stderr));

    let process_result = timeout(config.timeout, collect_output(&mut child, &mut tasks)).await;
    let elapsed = start_time.elapsed();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match process_result {
        Ok(Ok((stdout, stderr, status))) => {
            let exit_code = status.code().unwrap_or(-1);
            if !status.success() {
                tracing::debug!(pid, exit_code, %stderr, "copilot exited unsuccessfully");
                return Err(CopilotError::NonZeroExit {
                    exit_code,
                    pid,
                    elapsed,
                    stdout,
                    stderr,
                });
            }
            tracing::debug!(pid, duration_ms, "copilot finished");
            Ok(RunResult {
                stdout,
                stderr,
                exit_code,
                duration_ms,
            })
        }
        Ok(Err(e)) => Err(e),
        Err(_) => {
            if let Err(e) = graceful_shutdown(&mut child, pid).await {
                tracing::warn!(pid, error = %e, "Graceful shutdown after timeout failed");
            }
            let (partial_stdout, partial_stderr) = collect_partial(&mut tasks).await;

            Err(CopilotError::Timeout {
                elapsed,
                pid,
                partial_stdout,
                partial_stderr,
            })
        }
    }
}

/// Spawns the Copilot child process with piped stdout/stderr and a closed stdin.
fn spawn_child(
    path: &std::path::Path,
    args: &[std::ffi::OsString],
    config: &CopilotConfig,
) -> Result<Child, CopilotError> {
    let mut cmd = Command::new(path);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(ref dir) = config.cwd {
        cmd.current_dir(dir);
    }

    for (k, v) in &config.env_vars {
        cmd.env(k, v);
    }

    cmd.spawn().map_err(|e| CopilotError::SpawnFailed {
        stage: "spawn".to_string(),
        source: e,
    })
}

/// Joins both reader tasks and waits for the child to exit.
async fn collect_output(
    child: &mut Child,
    tasks: &mut JoinSet<Drained>,
) -> Result<CollectedOutput, CopilotError> {
    let mut stdout = String::new();
    let mut stderr = String::new();

    while let Some(result) = tasks.join_next().await {
        let drained = result.map_err(|e| CopilotError::StreamFailed {
            stage: "join".to_string(),
            source: e,
        })?;

        if drained.truncated {
            return Err(CopilotError::OutputTruncated {
                captured_bytes: drained.bytes,
                limit_bytes: MAX_OUTPUT_BYTES,
            });
        }

        match drained.pipe {
            Pipe::Stdout => stdout = drained.lines.join("\n"),
            Pipe::Stderr => stderr = drained.lines.join("\n"),
        }
    }

    let status = child.wait().await.map_err(|e| CopilotError::SpawnFailed {
        stage: "wait".to_string(),
        source: e,
    })?;

    Ok((stdout, stderr, status))
}

/// Gathers whatever the reader tasks captured before the child was stopped.
async fn collect_partial(tasks: &mut JoinSet<Drained>) -> (String, String) {
    let mut stdout = String::new();
    let mut stderr = String::new();

    let drained_all = timeout(GRACE_PERIOD, async {
        while let Some(Ok(drained)) = tasks.join_next().await {
            match drained.pipe {
                Pipe::Stdout => stdout = drained.lines.join("\n"),
                Pipe::Stderr => stderr = drained.lines.join("\n"),
            }
        }
    })
    .await;

    if drained_all.is_err() {
        tracing::warn!("Pipes still open after shutdown, discarding remaining output");
    }
    tasks.abort_all();

    (stdout, stderr)
}

/// Reads a pipe line by line, keeping at most [`MAX_OUTPUT_BYTES`].
///
/// Lines are read as raw bytes and decoded lossily, so invalid UTF-8 becomes
/// U+FFFD instead of ending the capture. Reading continues past the limit so
/// the child never blocks on a full pipe.
async fn drain_stream_bounded(stream: impl AsyncRead + Unpin, pipe: Pipe) -> Drained {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut lines = Vec::new();
    let mut bytes = 0usize;
    let mut truncated = false;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(?pipe, error = %e, "Failed to read from copilot pipe");
                break;
            }
        }

        let line = String::from_utf8_lossy(strip_line_ending(&buf)).into_owned();
        if bytes + line.len() <= MAX_OUTPUT_BYTES {
            bytes += line.len();
            lines.push(line);
        } else {
            truncated = true;
        }
    }

    Drained {
        pipe,
        lines,
        bytes,
        truncated,
    }
}

/// Drops a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Graceful shutdown: `SIGTERM`, wait grace period, then `SIGKILL`.
#[cfg(unix)]
async fn graceful_shutdown(child: &mut Child, pid: u32) -> Result<(), CopilotError> {
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid;

    let raw_pid = i32::try_from(pid).map_err(|_| CopilotError::SignalFailed {
        signal: "SIGTERM".to_string(),
        pid,
        reason: "PID value exceeds i32::MAX".to_string(),
    })?;

    signal::kill(Pid::from_raw(raw_pid), Signal::SIGTERM).map_err(|e| {
        CopilotError::SignalFailed {
            signal: "SIGTERM".to_string(),
            pid,
            reason: e.to_string(),
        }
    })?;

    match timeout(GRACE_PERIOD, child.wait()).await {
        Ok(Ok(_status)) => Ok(()),
        Ok(Err(e)) => Err(CopilotError::SpawnFailed {
            stage: "graceful_shutdown wait".to_string(),
            source: e,
        }),
        Err(_) => {
            child.kill().await.map_err(|e| CopilotError::SpawnFailed {
                stage: "SIGKILL".to_string(),
                source: e,
            })?;
            Ok(())
        }
    }
}

/// Windows: immediate termination, no graceful shutdown for console processes.
#[cfg(windows)]
async fn graceful_shutdown(child: &mut Child, _pid: u32) -> Result<(), CopilotError> {
    child.kill().await.map_err(|e| CopilotError::SpawnFailed {
        stage: "TerminateProcess".to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_keeps_lines_after_invalid_utf8() {
        let input: &[u8] = b"Voil\xe9:\r\n{\"version\":1}\nlast";
        let drained = drain_stream_bounded(input, Pipe::Stdout).await;

        assert_eq!(drained.lines, vec!["Voil\u{FFFD}:", "{\"version\":1}", "last"]);
        assert!(!drained.truncated);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"a\r\n"), b"a");
        assert_eq!(strip_line_ending(b"a\n"), b"a");
        assert_eq!(strip_line_ending(b"a"), b"a");
    }
}
