//! Patch parser: destination-line coordinates for one file's diff.
//!
//! Parses the `patch` field of a changed-file entry (hunk headers of the
//! form `@@ -a,b +c,d @@` followed by `+`/`-`/space-prefixed lines) into a
//! [`PatchMap`]. Only destination-side coordinates matter here: removed
//! lines occupy no line number in the new file and are consumed silently.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MAX_CONTEXT_LINES;
use crate::models::diff::{DiffLine, LineKind, PatchMap};

/// Matches a hunk header and captures the new-file start line.
static HUNK_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@ .* \+(\d+)(,\d+)? @@").unwrap());

/// Accumulator threaded through the line fold.
#[derive(Default)]
struct ParseState {
    lines: Vec<DiffLine>,
    valid_lines: std::collections::BTreeSet<u32>,
    malformed_hunks: usize,
    /// Destination-file cursor; the next emitted line is `cursor + 1`.
    cursor: u32,
}

/// Parse a unified-diff patch into line records and the valid-comment set.
///
/// The returned context lines are truncated to [`MAX_CONTEXT_LINES`];
/// `valid_lines` is deliberately NOT truncated and always covers every
/// added line in the full patch. A patch with no hunks yields empty
/// outputs; callers treat that as "nothing to review", not an error.
pub fn parse_patch(patch: &str) -> PatchMap {
    let state = patch.lines().fold(ParseState::default(), step);

    let mut lines = state.lines;
    lines.truncate(MAX_CONTEXT_LINES);

    PatchMap {
        lines,
        valid_lines: state.valid_lines,
        malformed_hunks: state.malformed_hunks,
    }
}

/// Process one patch line, advancing the destination cursor.
fn step(mut state: ParseState, line: &str) -> ParseState {
    if line.starts_with("@@") {
        match HUNK_HEADER_RE
            .captures(line)
            .and_then(|cap| cap[1].parse::<u32>().ok())
        {
            Some(new_start) => state.cursor = new_start.saturating_sub(1),
            // Known edge case, preserved: a header that does not match
            // leaves the cursor where the previous hunk ended, so line
            // numbers within this hunk will be off. Counted rather than
            // corrected; see DESIGN.md.
            None => state.malformed_hunks += 1,
        }
    } else if let Some(content) = line.strip_prefix('+') {
        state.cursor += 1;
        state.valid_lines.insert(state.cursor);
        state.lines.push(DiffLine {
            line_number: state.cursor,
            content: content.to_string(),
            kind: LineKind::Added,
        });
    } else if let Some(content) = line.strip_prefix(' ') {
        state.cursor += 1;
        state.lines.push(DiffLine {
            line_number: state.cursor,
            content: content.to_string(),
            kind: LineKind::Context,
        });
    }
    // `-` lines are consumed without touching the cursor; anything else
    // (e.g. "\ No newline at end of file") is ignored.
    state
}
