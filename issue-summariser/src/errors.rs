//! Error taxonomy for a single summarisation run.
//!
//! Every failure is terminal: the binary logs one diagnostic line, exits with
//! [`SummariserError::exit_code`], and writes nothing to stdout.

use std::fmt;
use thiserror::Error;

/// Boxed error from a collaborator implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Malformed or missing request input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Standard input could not be read.
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// Standard input was not a JSON object with a string `message` field.
    #[error("Failed to parse input JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The message was empty or whitespace-only.
    #[error("Input message is empty")]
    Empty,
}

/// Failure to recover a [`StructuredResult`](crate::types::StructuredResult)
/// from an agent reply.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The collaborator returned no content at all.
    #[error("No content in response")]
    EmptyReply,

    /// The extracted candidate is not a valid result object.
    #[error("Failed to parse response JSON: {source}")]
    Decode {
        /// The substring handed to the JSON decoder.
        candidate: String,
        /// Why decoding failed.
        #[source]
        source: serde_json::Error,
    },
}

/// Which step of the session lifecycle a collaborator failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorStage {
    /// Locating the agent or opening a session.
    Start,
    /// Sending the request and waiting for the reply.
    Send,
}

impl fmt::Display for CollaboratorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start session"),
            Self::Send => f.write_str("complete request"),
        }
    }
}

/// Top-level error for one invocation of the pipeline.
#[derive(Debug, Error)]
pub enum SummariserError {
    /// Bad or missing request input.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Invalid configuration, such as an unreadable persona file.
    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    /// The agent could not be started or did not complete the request.
    #[error("Agent failed to {stage}: {source}")]
    Collaborator {
        /// Lifecycle step that failed.
        stage: CollaboratorStage,
        /// Underlying collaborator error.
        #[source]
        source: BoxError,
    },

    /// The agent completed but returned no content.
    #[error("No content in response")]
    EmptyReply,

    /// The reply did not contain a valid result object.
    #[error("Failed to parse response JSON: {source}")]
    Decode {
        /// JSON-encoded request that was sent.
        input: String,
        /// Substring handed to the decoder.
        candidate: String,
        /// Full reply as received.
        reply: String,
        /// Why decoding failed.
        #[source]
        source: serde_json::Error,
    },

    /// The result could not be serialized for output.
    #[error("Failed to marshal output: {0}")]
    Render(#[source] serde_json::Error),
}

impl SummariserError {
    /// Wraps a collaborator failure at the given lifecycle stage.
    pub fn collaborator(stage: CollaboratorStage, source: impl Into<BoxError>) -> Self {
        Self::Collaborator {
            stage,
            source: source.into(),
        }
    }

    /// Process exit status for this failure category.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Render(_) => 1,
            Self::Input(_) | Self::Config(_) => 2,
            Self::Collaborator { .. } => 3,
            Self::EmptyReply => 4,
            Self::Decode { .. } => 5,
        }
    }
}
