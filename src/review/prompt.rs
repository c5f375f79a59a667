//! Prompt construction for inline reviews and the architectural summary.
//!
//! The inline prompt embeds the numbered diff context and the sorted list
//! of commentable lines, so the model has no excuse to invent targets.
//! The summary prompt sees only filenames and change counts.

use crate::models::{ChangedFile, FileCategory, PatchMap};

/// Base persona shared by every inline-review category.
const BASE_PERSONA: &str = "You are a senior iOS developer expert in Swift and code review.";

/// Persona for the architectural-summary pass.
pub const SUMMARY_PERSONA: &str =
    "You are an expert Swift/SwiftUI architect and code reviewer with 10+ years \
     of iOS development experience.";

/// System message for an inline review, specialized per file category.
pub fn system_message(category: FileCategory) -> String {
    let focus = match category {
        FileCategory::SwiftUi => {
            "Focus on SwiftUI best practices, data flow (State, Binding, \
             ObservableObject), view composition, and performance."
        }
        FileCategory::UiKit => {
            "Focus on UIKit best practices, view controller lifecycle, memory \
             management, and Auto Layout."
        }
        FileCategory::Test => {
            "Focus on test coverage, proper assertions, edge cases, and test \
             maintainability."
        }
        FileCategory::Config => {
            "Focus on configuration correctness and potential security issues."
        }
        FileCategory::Swift => {
            "Focus on Swift best practices, code quality, performance, and \
             maintainability."
        }
    };
    format!("{BASE_PERSONA} {focus}")
}

/// User prompt for one file's inline review.
pub fn inline_prompt(filename: &str, patch: &PatchMap, max_comments: usize) -> String {
    let diff_context: String = patch
        .lines
        .iter()
        .map(|l| format!("Line {}: {}", l.line_number, l.content))
        .collect::<Vec<_>>()
        .join("\n");

    let valid_lines: Vec<String> = patch
        .sorted_valid_lines()
        .iter()
        .map(u32::to_string)
        .collect();

    format!(
        "Review the changes in file \"{filename}\".\n\
         Provide suggestions ONLY for the newly added lines (marked with +).\n\
         Return a JSON array with objects containing \"line\" (number) and \
         \"comment\" (string) fields.\n\
         Focus on the most critical issues. Maximum {max_comments} comments.\n\n\
         Valid line numbers for comments: [{}]\n\n\
         ```\n{diff_context}\n```",
        valid_lines.join(", "),
    )
}

/// User prompt for the whole-PR architectural summary.
pub fn summary_prompt(files: &[ChangedFile]) -> String {
    format!(
        "You are an expert iOS developer and architect reviewing a pull request.\n\n\
         **Files Changed ({} files):**\n{}\n\n\
         Please provide a **comprehensive, structured analysis** covering:\n\n\
         ## Pull Request Summary\n\
         - Brief overview of the changes and their purpose\n\
         - Impact assessment (High/Medium/Low)\n\n\
         ## Architecture & Design\n\
         - Review of architectural patterns (MVC, MVVM, SwiftUI)\n\
         - Design principle adherence (SOLID, Clean Architecture)\n\
         - Suggestions for architectural improvements\n\n\
         ## Memory & Performance\n\
         - Memory management best practices\n\
         - Potential retain cycles or leaks\n\
         - Threading and concurrency considerations\n\n\
         ## Security & Best Practices\n\
         - Data handling and privacy compliance\n\
         - Input validation and error handling\n\n\
         ## Testing & Quality\n\
         - Test coverage assessment\n\
         - Code maintainability and readability\n\n\
         ## Action Items\n\
         1. **High Priority**: Critical issues that should be addressed\n\
         2. **Medium Priority**: Important improvements\n\
         3. **Low Priority**: Nice-to-have optimizations\n\n\
         ## Overall Assessment\n\
         - Code quality score (1-10)\n\
         - Readiness for merge (Ready/Needs Changes/Major Revisions)\n\n\
         Format as **clear Markdown** with bullet points and code examples \
         where helpful.",
        files.len(),
        file_listing(files),
    )
}

/// Wrap the generated analysis in the posted comment body.
pub fn summary_comment_body(analysis: &str, commit_sha: &str) -> String {
    let short_sha: String = commit_sha.chars().take(7).collect();
    format!(
        "# AI Code Review Summary\n\n\
         {analysis}\n\n\
         ---\n\
         > **Note**: This analysis was generated by AI and should be reviewed \
         by human developers.\n\
         >\n\
         > **Inline Comments**: Check individual file diffs for detailed \
         line-by-line feedback.\n\
         >\n\
         > **Commit**: {short_sha}"
    )
}

/// Summary body used when the model call itself failed.
pub fn fallback_summary(files: &[ChangedFile], error: &str) -> String {
    format!(
        "## AI Code Review Summary\n\n\
         **Note**: Error occurred during analysis generation.\n\n\
         ### Files Reviewed\n{}\n\n\
         ### Status\n\
         Analysis could not be completed due to: {error}\n\n\
         Please review the inline comments for detailed feedback on \
         individual files.",
        file_listing(files),
    )
}

/// Simplified body for the retry after a failed summary post.
pub fn simplified_summary(files: &[ChangedFile]) -> String {
    let names: String = files
        .iter()
        .map(|f| format!("- {}", f.filename))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "## AI Code Review Summary\n\n\
         **Files Reviewed**: {} files\n{names}\n\n\
         **Status**: Analysis completed with rate limiting. Check inline \
         comments for specific feedback.\n\n\
         *Note: Simplified summary due to API limitations.*",
        files.len(),
    )
}

/// Summary body when the PR contains nothing reviewable.
pub fn nothing_reviewable_summary() -> String {
    "## AI Code Review Summary\n\n\
     **Status**: No reviewable code files found in this PR.\n\n\
     The PR may contain only:\n\
     - Binary files (images, assets)\n\
     - Configuration files\n\
     - Documentation files\n\n\
     No code review comments were generated."
        .to_string()
}

/// One `- name (+a/-d lines)` entry per file.
fn file_listing(files: &[ChangedFile]) -> String {
    files
        .iter()
        .map(|f| format!("- {} (+{}/-{} lines)", f.filename, f.additions, f.deletions))
        .collect::<Vec<_>>()
        .join("\n")
}
