//! One request → reply → decode cycle.

use crate::agent::{AgentSession, Collaborator};
use crate::config::PersonaSource;
use crate::errors::{CollaboratorStage, ExtractError, SummariserError};
use crate::extract::extract_and_decode;
use crate::request::{self, Message};
use crate::types::StructuredResult;
use std::io::Read;

/// Runs a whole invocation: build the request, load the persona, then
/// summarise with the collaborator returned by `connect`.
///
/// `connect` is only called once the request and persona are valid, so bad
/// input never reaches the agent.
///
/// # Errors
/// `Input` and `Config` failures are returned before `connect` runs. After
/// that, any error from `connect` or [`summarise`] is passed through.
pub async fn run<C, F>(
    args: &[String],
    stdin: impl Read,
    persona: &PersonaSource,
    connect: F,
) -> Result<StructuredResult, SummariserError>
where
    C: Collaborator,
    F: FnOnce() -> Result<C, SummariserError>,
{
    let message = request::build(args, stdin)?;
    let persona = persona.load()?;
    tracing::debug!(message_len = message.text.len(), "Request ready");

    let collaborator = connect()?;
    summarise(&collaborator, &persona, &message).await
}

/// Sends `message` to a fresh session of `collaborator` and decodes the reply.
///
/// The session is closed on every path once it has been opened. A failure to
/// close is logged and does not override the run's outcome.
pub async fn summarise<C: Collaborator>(
    collaborator: &C,
    persona: &str,
    message: &Message,
) -> Result<StructuredResult, SummariserError> {
    let request = message.to_wire();

    let mut session = collaborator
        .start_session(persona)
        .await
        .map_err(|e| SummariserError::collaborator(CollaboratorStage::Start, e))?;

    let reply = session.send_and_wait(&request).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close agent session");
    }
    let reply = reply.map_err(|e| SummariserError::collaborator(CollaboratorStage::Send, e))?;

    let decoded = extract_and_decode(reply.as_deref());
    match decoded {
        Ok(result) => {
            tracing::debug!(version = result.version, title = %result.title, "Decoded reply");
            Ok(result)
        }
        Err(ExtractError::EmptyReply) => Err(SummariserError::EmptyReply),
        Err(ExtractError::Decode { candidate, source }) => {
            let reply = reply.unwrap_or_default();
            tracing::debug!(input = %request, response = %reply, "Reply did not decode");
            Err(SummariserError::Decode {
                input: request,
                candidate,
                reply,
                source,
            })
        }
    }
}
