use thiserror::Error;

/// Errors produced while locating or driving the Copilot CLI.
#[derive(Debug, Error)]
pub enum CopilotError {
    /// No usable `copilot` executable was found.
    #[error("Copilot executable not found: {0}")]
    ExecutableNotFound(String),

    /// Spawning, waiting on, or killing the subprocess failed.
    #[error("Failed to spawn process at stage '{stage}': {source}")]
    SpawnFailed {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess did not finish within the configured timeout.
    #[error("Process timed out after {elapsed:?} (PID: {pid})")]
    Timeout {
        elapsed: std::time::Duration,
        pid: u32,
        partial_stdout: String,
        partial_stderr: String,
    },

    /// The subprocess finished with a failing exit status.
    #[error("Process exited with code {exit_code} (PID: {pid}, elapsed: {elapsed:?})")]
    NonZeroExit {
        exit_code: i32,
        pid: u32,
        elapsed: std::time::Duration,
        stdout: String,
        stderr: String,
    },

    /// A pipe reader task panicked or was cancelled.
    #[error("Stream task failed at stage '{stage}': {source}")]
    StreamFailed {
        stage: String,
        #[source]
        source: tokio::task::JoinError,
    },

    /// Delivering a termination signal failed.
    #[error("Failed to send signal {signal} to PID {pid}: {reason}")]
    SignalFailed {
        signal: String,
        pid: u32,
        reason: String,
    },

    #[error("Child process stdout was not captured")]
    NoStdout,

    #[error("Child process stderr was not captured")]
    NoStderr,

    #[error("Could not get PID from child process")]
    NoPid,

    /// Output exceeded the capture limit.
    #[error("Output truncated: captured {captured_bytes} bytes (limit: {limit_bytes} bytes)")]
    OutputTruncated {
        captured_bytes: usize,
        limit_bytes: usize,
    },

    /// The session's scratch workspace could not be created or removed.
    #[error("Session workspace error: {0}")]
    Workspace(#[source] std::io::Error),

    /// The session was used after [`close`](crate::CopilotSession::close).
    #[error("Session {0} is already closed")]
    SessionClosed(uuid::Uuid),
}
