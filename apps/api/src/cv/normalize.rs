//! Text normalization shared by document uploads and pasted CV text.

use thiserror::Error;

/// Minimum number of characters a CV must have after normalization.
pub const MIN_CONTENT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("CV content must be at least {minimum} characters long (got {observed})")]
    ContentTooShort { observed: usize, minimum: usize },
}

/// Cleans raw text:
/// - whitespace runs inside a line become a single space
/// - line breaks are kept, runs of blank lines become exactly one blank line
/// - leading/trailing whitespace is removed
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    let mut pending_blank = false;

    for line in unified.split('\n') {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(&collapsed);
    }

    out
}

/// Rejects text shorter than [`MIN_CONTENT_CHARS`], measured in characters.
pub fn enforce_min_length(text: &str) -> Result<(), NormalizeError> {
    let observed = text.chars().count();
    if observed < MIN_CONTENT_CHARS {
        return Err(NormalizeError::ContentTooShort {
            observed,
            minimum: MIN_CONTENT_CHARS,
        });
    }
    Ok(())
}

/// Normalizes and applies the length policy in one step.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let text = normalize_text(raw);
    enforce_min_length(&text)?;
    Ok(text)
}
