#![deny(missing_docs)]
//! Turns a free-text issue description into a structured
//! `{version, title, prompt}` record.
//!
//! The language understanding is delegated to a conversational agent (the
//! GitHub Copilot CLI in production). This crate builds the request, recovers
//! a single JSON object from the agent's free-form reply, and renders it.

/// Conversational agent boundary and its Copilot implementation.
pub mod agent;
/// Run configuration and persona loading.
pub mod config;
/// Error taxonomy.
pub mod errors;
/// JSON object extraction from agent replies.
pub mod extract;
/// The end-to-end request/reply/decode cycle.
pub mod pipeline;
/// Output serialization.
pub mod render;
/// Request normalization.
pub mod request;
/// The structured result record.
pub mod types;

pub use agent::{AgentSession, Collaborator};
pub use config::{PersonaSource, SummariserConfig};
pub use errors::{CollaboratorStage, ExtractError, InputError, SummariserError};
pub use extract::extract_and_decode;
pub use pipeline::{run, summarise};
pub use render::render;
pub use request::Message;
pub use types::StructuredResult;
