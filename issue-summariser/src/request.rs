//! Normalizes CLI tokens or a stdin JSON document into one [`Message`].

use crate::errors::InputError;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The instruction sent to the agent.
///
/// Serializes as `{"message": "<text>"}`, which is also the accepted stdin
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable instruction text. Never empty.
    #[serde(rename = "message")]
    pub text: String,
}

impl Message {
    /// Wraps `text`, rejecting empty or whitespace-only input.
    pub fn new(text: impl Into<String>) -> Result<Self, InputError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InputError::Empty);
        }
        Ok(Self { text })
    }

    /// JSON encoding sent to the agent.
    #[must_use]
    pub fn to_wire(&self) -> String {
        serde_json::json!({ "message": self.text }).to_string()
    }
}

/// Builds the request from command-line tokens, falling back to stdin.
///
/// With one or more tokens, all of them are joined with single spaces.
/// Otherwise `stdin` is read to the end and parsed as `{"message": "..."}`.
/// `stdin` is not touched when tokens are present.
pub fn build(args: &[String], mut stdin: impl Read) -> Result<Message, InputError> {
    if !args.is_empty() {
        tracing::debug!(tokens = args.len(), "Building message from arguments");
        return Message::new(args.join(" "));
    }

    let mut bytes = Vec::new();
    stdin.read_to_end(&mut bytes).map_err(InputError::Read)?;
    tracing::debug!(bytes = bytes.len(), "Building message from stdin");

    let parsed: Message = serde_json::from_slice(&bytes).map_err(InputError::Parse)?;
    Message::new(parsed.text)
}
