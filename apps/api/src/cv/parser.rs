//! Decodes raw model completions into a [`ResumeStructure`].
//!
//! Only wrapping artifacts are removed (code fences, stray prose around the
//! object). Content is never repaired: anything that fails strict decoding is
//! reported as [`ParseError::MalformedModelOutput`] and the pipeline falls back.

use serde_json::Value;
use thiserror::Error;

use crate::models::ResumeStructure;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),
}

pub fn parse_model_output(raw: &str) -> Result<ResumeStructure, ParseError> {
    let candidate = extract_json_object(strip_json_fences(raw));

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ParseError::MalformedModelOutput(e.to_string()))?;

    if !value.is_object() {
        return Err(ParseError::MalformedModelOutput(
            "top-level value is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ParseError::MalformedModelOutput(e.to_string()))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Narrows to the outermost `{ ... }` span when prose surrounds the object.
/// Text that opens an array or string is left alone so it still fails the
/// object check.
fn extract_json_object(text: &str) -> &str {
    if text.starts_with(['[', '"']) || (text.starts_with('{') && text.ends_with('}')) {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}
