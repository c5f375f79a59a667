//! Suggestion validation: the fence between the model and the hosting API.
//!
//! The model is instructed to return a bare JSON array of
//! `{"line": N, "comment": "..."}` objects, but in practice wraps it in a
//! markdown fence, invents line numbers outside the diff, or returns prose.
//! Everything that reaches the posting collaborator goes through here first.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{PendingComment, ReviewSuggestion};

/// Leading fence marker line (```` ``` ```` optionally tagged, e.g. ```` ```json ````).
static FENCE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```\w*\n?").unwrap());

/// Trailing fence marker line.
static FENCE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n?```$").unwrap());

/// Reasons the model output could not be used at all.
///
/// Neither variant is fatal to the run; the caller reports it and the
/// file simply gets no inline comments.
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model output is not a JSON array")]
    NotAnArray,
}

/// Reconcile raw model output against the valid-comment-line set.
///
/// Accepts suggestions in model output order, dropping any that are
/// malformed, target a line outside `valid_lines`, or arrive after
/// `max_count` acceptances. Every returned [`PendingComment`] is
/// guaranteed to target a member of `valid_lines` and to carry
/// non-empty text ending in sentence punctuation.
pub fn validate_suggestions(
    filename: &str,
    raw: &str,
    valid_lines: &BTreeSet<u32>,
    max_count: usize,
) -> Result<Vec<PendingComment>, ValidateError> {
    let cleaned = strip_code_fence(raw.trim());

    let value: serde_json::Value = serde_json::from_str(cleaned.trim())?;
    let elements = value.as_array().ok_or(ValidateError::NotAnArray)?;

    let mut accepted = Vec::new();
    for element in elements {
        if accepted.len() >= max_count {
            break;
        }
        // Elements missing `line` or `comment` (or with wrong types) are
        // discarded, not treated as errors.
        let Ok(suggestion) = serde_json::from_value::<ReviewSuggestion>(element.clone()) else {
            continue;
        };
        if !valid_lines.contains(&suggestion.line) {
            continue;
        }
        let Some(comment_text) = normalize_comment(&suggestion.comment) else {
            continue;
        };
        accepted.push(PendingComment {
            filename: filename.to_string(),
            line_number: suggestion.line,
            comment_text,
        });
    }

    Ok(accepted)
}

/// Strip a surrounding markdown code fence, if present.
///
/// The model is told to return pure JSON but may wrap it for display;
/// that wrapping is tolerated, never rejected.
fn strip_code_fence(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }
    let without_open = FENCE_OPEN_RE.replace(text, "");
    FENCE_CLOSE_RE.replace(&without_open, "").into_owned()
}

/// Trim a comment and guarantee terminal sentence punctuation.
///
/// Returns `None` when nothing but whitespace remains. Idempotent:
/// text already ending in `.`, `!` or `?` is returned unchanged.
fn normalize_comment(comment: &str) -> Option<String> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with(['.', '!', '?']) {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}."))
    }
}
