//! The structured record recovered from an agent reply.

use serde::{Deserialize, Serialize};

/// A summarised issue: `{version, title, prompt}`.
///
/// All three fields are required when decoding. Unknown extra fields in the
/// agent's object are ignored. Field order here is the output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResult {
    /// Schema version of the reply contract.
    pub version: i64,
    /// Short human-readable summary.
    pub title: String,
    /// The issue restated as an instruction.
    pub prompt: String,
}
