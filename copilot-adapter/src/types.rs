//! Configuration and result types for Copilot CLI invocations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which tools the agent may use without asking for approval.
///
/// Non-interactive runs cannot answer approval prompts, so anything not
/// granted here is effectively unavailable to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToolPermissions {
    /// Grant nothing. The agent can only answer in text.
    None,
    /// `--allow-all-tools`.
    AllowAll,
    /// Explicit `--allow-tool` / `--deny-tool` lists.
    Explicit {
        /// Tool patterns passed to `--allow-tool`.
        allow: Vec<String>,
        /// Tool patterns passed to `--deny-tool`.
        deny: Vec<String>,
    },
}

/// Configuration for a single Copilot CLI invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotConfig {
    /// Model name override (e.g. `"gpt-4.1"`).
    pub model: Option<String>,
    /// Tool approval policy.
    pub tools: ToolPermissions,
    /// Extra directories the agent is allowed to read.
    pub add_dirs: Vec<PathBuf>,
    /// CLI log level (`--log-level`).
    pub log_level: Option<String>,
    /// Print only the agent's answer, without usage statistics.
    pub silent: bool,
    /// Maximum wall-clock duration before the process is terminated.
    pub timeout: Duration,
    /// Working directory for the subprocess.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables passed to the subprocess.
    pub env_vars: Vec<(String, String)>,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            model: None,
            tools: ToolPermissions::None,
            add_dirs: Vec::new(),
            log_level: None,
            silent: true,
            timeout: Duration::from_secs(300),
            cwd: None,
            env_vars: Vec::new(),
        }
    }
}

/// Result of a completed Copilot CLI invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit code (`-1` if unavailable).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}
