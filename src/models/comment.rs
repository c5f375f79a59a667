//! Review comment types: raw LLM suggestions and validated pending comments.

use serde::{Deserialize, Serialize};

/// A candidate comment proposed by the language model.
///
/// Raw and untrusted until checked against the patch's valid-line set;
/// the model routinely proposes lines outside the diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSuggestion {
    /// Destination-file line number the comment should attach to.
    pub line: u32,
    /// The comment text.
    pub comment: String,
}

/// A suggestion that has passed validation and is ready to post.
///
/// Created by the suggestion validator, consumed exactly once by the
/// posting collaborator, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    /// Path of the file the comment belongs to.
    pub filename: String,
    /// Destination-file line number, guaranteed to be a valid comment target.
    pub line_number: u32,
    /// Normalized comment text: non-empty, ends with `.`, `!` or `?`.
    pub comment_text: String,
}
