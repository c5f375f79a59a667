//! Diff-related types: parsed patch lines and the valid-comment-line set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The kind of a line surfaced from a patch.
///
/// Removed lines are never materialized: they occupy no destination-file
/// line number and can never anchor a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Line exists only in the new version (prefixed `+` in the patch).
    Added,
    /// Line is unchanged (prefixed with a space in the patch).
    Context,
}

/// A single line surfaced from a patch, addressed by its position in the
/// new (post-change) version of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffLine {
    /// Line number in the new file (1-based).
    pub line_number: u32,
    /// The content of the line (without the leading marker).
    pub content: String,
    /// Whether the line was added or is surrounding context.
    pub kind: LineKind,
}

/// The result of parsing one file's patch.
///
/// `lines` is the prompt context and is capped; `valid_lines` reflects every
/// added line in the full patch, including those past the cap. Comments may
/// therefore legally target lines that never appear in the context window.
#[derive(Debug, Clone, Default)]
pub struct PatchMap {
    /// Context and added lines in patch order, capped for prompt size.
    pub lines: Vec<DiffLine>,
    /// Destination line numbers eligible for a comment (all added lines).
    pub valid_lines: BTreeSet<u32>,
    /// Number of hunk headers that did not match the expected format.
    ///
    /// A malformed header leaves the line counter unchanged, so line
    /// numbers for that hunk are unreliable. Surfaced so runs can report
    /// it instead of mis-numbering silently.
    pub malformed_hunks: usize,
}

impl PatchMap {
    /// Returns `true` if the patch produced no reviewable lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of added lines in the context window.
    pub fn added_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind == LineKind::Added)
            .count()
    }

    /// Valid comment targets in ascending order, for prompt embedding.
    pub fn sorted_valid_lines(&self) -> Vec<u32> {
        self.valid_lines.iter().copied().collect()
    }
}
