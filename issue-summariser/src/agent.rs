//! The conversational agent boundary.
//!
//! The pipeline only needs three operations: open a session bound to a
//! persona, send one message and wait for the reply, and close the session.
//! [`CopilotCli`] is the production implementation. Tests substitute scripted
//! agents.

use async_trait::async_trait;
use copilot_adapter::{CopilotCli, CopilotError, CopilotSession};

/// An open conversational context.
#[async_trait]
pub trait AgentSession: Send {
    /// Error reported by this session.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one message and blocks until the agent replies.
    ///
    /// `Ok(None)` means the agent finished without producing content.
    async fn send_and_wait(&mut self, message: &str) -> Result<Option<String>, Self::Error>;

    /// Releases agent-side resources.
    async fn close(&mut self) -> Result<(), Self::Error>;
}

/// Something that can open [`AgentSession`]s.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Session type produced by this collaborator.
    type Session: AgentSession;

    /// Opens a session whose behavioral contract is `persona`.
    async fn start_session(
        &self,
        persona: &str,
    ) -> Result<Self::Session, <Self::Session as AgentSession>::Error>;
}

#[async_trait]
impl AgentSession for CopilotSession {
    type Error = CopilotError;

    async fn send_and_wait(&mut self, message: &str) -> Result<Option<String>, CopilotError> {
        self.ask(message).await
    }

    async fn close(&mut self) -> Result<(), CopilotError> {
        CopilotSession::close(self)
    }
}

#[async_trait]
impl Collaborator for CopilotCli {
    type Session = CopilotSession;

    async fn start_session(&self, persona: &str) -> Result<CopilotSession, CopilotError> {
        self.open_session(persona)
    }
}
