//! Scoped conversational sessions on top of one-shot CLI invocations.
//!
//! A [`CopilotSession`] owns a private scratch directory that every request
//! runs in, so the agent never sees the caller's working tree. The directory
//! is removed by [`CopilotSession::close`], or on drop if close was never
//! reached.

use crate::error::CopilotError;
use crate::process::run_copilot;
use crate::types::CopilotConfig;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

/// A conversational context bound to one persona.
#[derive(Debug)]
pub struct CopilotSession {
    id: Uuid,
    binary: PathBuf,
    persona: String,
    config: CopilotConfig,
    workspace: Option<TempDir>,
}

impl CopilotSession {
    pub(crate) fn open(
        binary: PathBuf,
        persona: &str,
        config: CopilotConfig,
    ) -> Result<Self, CopilotError> {
        let id = Uuid::new_v4();
        let workspace = tempfile::Builder::new()
            .prefix("copilot-session-")
            .tempdir()
            .map_err(CopilotError::Workspace)?;
        tracing::debug!(session = %id, workspace = %workspace.path().display(), "Opened session");

        Ok(Self {
            id,
            binary,
            persona: persona.to_string(),
            config,
            workspace: Some(workspace),
        })
    }

    /// Unique identifier of this session, used in log output.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The scratch directory requests run in, or `None` once closed.
    #[must_use]
    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_ref().map(TempDir::path)
    }

    /// Sends `message` under this session's persona and waits for the reply.
    ///
    /// Returns `Ok(None)` when the agent finished without printing anything.
    ///
    /// # Errors
    /// Returns `CopilotError::SessionClosed` after [`close`](Self::close), or
    /// any error from running the CLI.
    pub async fn ask(&self, message: &str) -> Result<Option<String>, CopilotError> {
        let workspace = self
            .workspace()
            .ok_or(CopilotError::SessionClosed(self.id))?;

        let mut config = self.config.clone();
        if config.cwd.is_none() {
            config.cwd = Some(workspace.to_path_buf());
        }

        let prompt = compose_prompt(&self.persona, message);
        tracing::info!(session = %self.id, "Waiting for agent reply");
        let result = run_copilot(&self.binary, &prompt, &config).await?;

        if result.stdout.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(result.stdout))
        }
    }

    /// Releases the session's scratch directory. Closing twice is a no-op.
    ///
    /// # Errors
    /// Returns `CopilotError::Workspace` if the directory cannot be removed.
    pub fn close(&mut self) -> Result<(), CopilotError> {
        if let Some(workspace) = self.workspace.take() {
            workspace.close().map_err(CopilotError::Workspace)?;
            tracing::debug!(session = %self.id, "Closed session");
        }
        Ok(())
    }
}

impl Drop for CopilotSession {
    fn drop(&mut self) {
        if self.workspace.is_some() {
            tracing::debug!(session = %self.id, "Session dropped without close, removing workspace");
        }
    }
}

/// Lays out the persona as a system preamble ahead of the user's message.
fn compose_prompt(persona: &str, message: &str) -> String {
    let mut prompt = String::new();

    if !persona.trim().is_empty() {
        let _ = write!(prompt, "System: {persona}\n\n");
    }
    let _ = write!(prompt, "User: {message}");

    prompt
}
