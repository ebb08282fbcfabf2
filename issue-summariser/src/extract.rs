//! Recovers one JSON object from free-form agent text.
//!
//! Agent replies are untrusted text. The object may be wrapped in a markdown
//! fence, surrounded by prose, or followed by more JSON-looking text.
//! Extraction runs in three steps:
//!
//! 1. [`strip_fences`] removes one surrounding ```` ``` ```` fence, if the
//!    reply starts with one.
//! 2. [`extract_json_object`] returns the first balanced top-level `{...}`,
//!    skipping braces inside string literals.
//! 3. [`decode`] parses that candidate into a [`StructuredResult`].

use crate::errors::ExtractError;
use crate::types::StructuredResult;

const FENCE: &str = "```";

/// Strips a markdown code fence around `reply`.
///
/// The text is trimmed first. If it then starts with a fence, the opening
/// fence line (including any language tag) and everything from the last
/// fence onward are removed, and the rest is trimmed again. Text that does
/// not start with a fence is only trimmed.
#[must_use]
pub fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    let mut body = trimmed;
    if let Some(newline) = body.find('\n') {
        body = &body[newline + 1..];
    }
    if let Some(closing) = body.rfind(FENCE) {
        body = &body[..closing];
    }
    body.trim()
}

/// Brace and string tracking for [`extract_json_object`].
#[derive(Debug, Default)]
struct ScanState {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl ScanState {
    /// Feeds one byte. Returns `true` when it closes the outermost object.
    fn step(&mut self, byte: u8) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }

        match byte {
            b'\\' if self.in_string => self.escaped = true,
            b'"' => self.in_string = !self.in_string,
            _ if self.in_string => {}
            b'{' => self.depth += 1,
            b'}' => {
                self.depth = self.depth.saturating_sub(1);
                return self.depth == 0;
            }
            _ => {}
        }
        false
    }
}

/// Returns the first balanced top-level JSON object in `text`.
///
/// Scanning starts at the first `{`. Braces inside string literals are not
/// counted, and `\"` does not end a string. If there is no `{` at all the
/// whole of `text` is returned. If the object never closes, everything from
/// the first `{` to the end is returned. Both cases are left for the decoder
/// to reject.
#[must_use]
pub fn extract_json_object(text: &str) -> &str {
    let Some(start) = text.find('{') else {
        return text;
    };

    let mut state = ScanState::default();
    for (offset, &byte) in text.as_bytes()[start..].iter().enumerate() {
        // Structural bytes are ASCII, so `offset` always lands on a char boundary.
        if state.step(byte) {
            return &text[start..=start + offset];
        }
    }

    &text[start..]
}

/// Parses a candidate substring into a [`StructuredResult`].
///
/// `version`, `title` and `prompt` are all required and must have the right
/// JSON types.
pub fn decode(candidate: &str) -> Result<StructuredResult, ExtractError> {
    serde_json::from_str(candidate).map_err(|source| ExtractError::Decode {
        candidate: candidate.to_string(),
        source,
    })
}

/// Runs fence stripping, the balanced scan, and decoding over `reply`.
///
/// `None` means the collaborator returned no content and yields
/// [`ExtractError::EmptyReply`]. A present but unusable reply always yields
/// [`ExtractError::Decode`].
pub fn extract_and_decode(reply: Option<&str>) -> Result<StructuredResult, ExtractError> {
    let reply = reply.ok_or(ExtractError::EmptyReply)?;

    let candidate = extract_json_object(strip_fences(reply));
    tracing::debug!(
        reply_len = reply.len(),
        candidate_len = candidate.len(),
        "Extracted JSON candidate"
    );

    decode(candidate)
}
