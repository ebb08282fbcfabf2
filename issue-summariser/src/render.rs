//! Output serialization.

use crate::errors::SummariserError;
use crate::types::StructuredResult;

/// Pretty-prints `result` with two-space indentation in `version`, `title`,
/// `prompt` order.
pub fn render(result: &StructuredResult) -> Result<String, SummariserError> {
    serde_json::to_string_pretty(result).map_err(SummariserError::Render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_and_decode;

    #[test]
    fn test_render_layout() {
        let result = StructuredResult {
            version: 1,
            title: "Fix bug".to_string(),
            prompt: "There is a bug, can you fix it?".to_string(),
        };

        assert_eq!(
            render(&result).unwrap(),
            "{\n  \"version\": 1,\n  \"title\": \"Fix bug\",\n  \"prompt\": \"There is a bug, can you fix it?\"\n}"
        );
    }

    #[test]
    fn test_render_then_extract_is_lossless() {
        let result = StructuredResult {
            version: 3,
            title: "Handle \"quoted\" {braces}".to_string(),
            prompt: "Line one\nline two \\ with a backslash and ünïcode".to_string(),
        };

        let rendered = render(&result).unwrap();
        assert_eq!(extract_and_decode(Some(rendered.as_str())).unwrap(), result);
    }
}
