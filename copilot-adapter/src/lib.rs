//! Rust adapter for driving the GitHub Copilot CLI as a subprocess.
//!
//! This crate provides discovery and execution of the `copilot`
//! command-line tool in non-interactive mode, with bounded output capture,
//! graceful timeout handling, and scoped sessions that bind a persona to a
//! private scratch directory.

/// Command-line argument construction for Copilot CLI invocations.
pub mod cmd;
/// Discovery and resolution of the Copilot CLI executable path.
pub mod discovery;
/// Error types returned by adapter operations.
pub mod error;
/// Subprocess execution with timeouts and signal handling.
pub mod process;
/// Persona-bound sessions with guaranteed workspace cleanup.
pub mod session;
/// Shared data types for configuration and results.
pub mod types;

pub use discovery::{discover_copilot, COPILOT_BIN_ENV_VAR};
pub use error::CopilotError;
pub use process::run_copilot;
pub use session::CopilotSession;
pub use types::*;

/// High-level client for the Copilot CLI.
#[derive(Debug, Clone)]
pub struct CopilotCli {
    /// Filesystem path to the `copilot` executable.
    pub path: std::path::PathBuf,
    /// Configuration applied to every invocation made through this client.
    pub config: CopilotConfig,
}

impl CopilotCli {
    /// Creates a client for the executable at `path` with default configuration.
    #[must_use]
    pub fn new(path: std::path::PathBuf) -> Self {
        Self {
            path,
            config: CopilotConfig::default(),
        }
    }

    /// Replaces the invocation configuration.
    #[must_use]
    pub fn with_config(mut self, config: CopilotConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs a single prompt through the CLI and returns the complete result.
    ///
    /// # Errors
    ///
    /// Returns `CopilotError` if the subprocess fails to spawn, times out,
    /// or exits unsuccessfully.
    pub async fn run(&self, prompt: &str) -> Result<RunResult, CopilotError> {
        run_copilot(&self.path, prompt, &self.config).await
    }

    /// Opens a session whose requests are prefixed with `persona`.
    ///
    /// # Errors
    ///
    /// Returns `CopilotError::Workspace` if the session's scratch directory
    /// cannot be created.
    pub fn open_session(&self, persona: &str) -> Result<CopilotSession, CopilotError> {
        CopilotSession::open(self.path.clone(), persona, self.config.clone())
    }
}
