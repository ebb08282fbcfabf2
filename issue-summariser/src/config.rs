//! Run configuration and persona loading.

use anyhow::Context;
use copilot_adapter::{CopilotConfig, ToolPermissions};
use std::path::PathBuf;
use std::time::Duration;

/// Model requested when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Seconds to wait for the agent before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Persona compiled into the binary.
pub const DEFAULT_PERSONA: &str = include_str!("../agents/issue-summariser.agent.md");

/// Where the session persona comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersonaSource {
    /// The document compiled into the binary.
    #[default]
    Embedded,
    /// A document read from disk at startup.
    File(PathBuf),
}

impl PersonaSource {
    /// Returns the persona text.
    ///
    /// # Errors
    /// Fails if the file cannot be read or contains only whitespace.
    pub fn load(&self) -> anyhow::Result<String> {
        match self {
            Self::Embedded => Ok(DEFAULT_PERSONA.to_string()),
            Self::File(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read persona {}", path.display()))?;
                anyhow::ensure!(
                    !text.trim().is_empty(),
                    "Persona {} is empty",
                    path.display()
                );
                tracing::debug!(path = %path.display(), "Loaded persona from file");
                Ok(text)
            }
        }
    }
}

/// Settings for one summarisation run.
#[derive(Debug, Clone)]
pub struct SummariserConfig {
    /// Override for the `copilot` executable (None = auto-discover).
    pub binary_path: Option<PathBuf>,

    /// Model requested from the agent.
    pub model: String,

    /// Maximum time to wait for the agent's reply.
    ///
    /// Default: 300 seconds (5 minutes)
    pub timeout: Duration,

    /// Source of the session persona.
    pub persona: PersonaSource,
}

impl Default for SummariserConfig {
    fn default() -> Self {
        Self {
            binary_path: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            persona: PersonaSource::Embedded,
        }
    }
}

impl SummariserConfig {
    /// Adapter configuration for the collaborator.
    ///
    /// The agent is granted no tools: it only has to answer in text.
    #[must_use]
    pub fn copilot_config(&self) -> CopilotConfig {
        CopilotConfig {
            model: Some(self.model.clone()),
            tools: ToolPermissions::None,
            silent: true,
            timeout: self.timeout,
            ..CopilotConfig::default()
        }
    }
}
