//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and review defaults so a rename only requires changing this file.

use std::time::Duration;

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "prvet";

/// Crate version, injected by cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.prvet.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".prvet.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "prvet";

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

// ── Review defaults ─────────────────────────────────────────────────

/// Maximum inline comments posted per file.
pub const MAX_COMMENTS_PER_FILE: usize = 5;

/// Maximum diff lines embedded in an inline-review prompt.
///
/// The valid-comment-line set is never capped; only the prompt context is.
pub const MAX_CONTEXT_LINES: usize = 300;

/// Fixed delay before every rate-limited outbound call.
pub const API_DELAY: Duration = Duration::from_secs(2);

/// Extra wait after GitHub signals rate limiting on an inline comment.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(10);

/// Extra wait before retrying a rate-limited summary post.
pub const SUMMARY_RETRY_BACKOFF: Duration = Duration::from_secs(15);

/// Token budget for an inline-review completion.
pub const INLINE_MAX_TOKENS: u64 = 800;

/// Token budget for the architectural-summary completion.
pub const SUMMARY_MAX_TOKENS: u64 = 1500;

/// Sampling temperature for inline reviews.
pub const INLINE_TEMPERATURE: f64 = 0.2;

/// Sampling temperature for the architectural summary.
pub const SUMMARY_TEMPERATURE: f64 = 0.1;

/// Filename fragments excluded from review (Xcode internals, assets,
/// lockfiles, binary formats, docs and serialized config).
pub const EXCLUDE_PATTERNS: &[&str] = &[
    ".xcodeproj",
    ".xcworkspace",
    ".xcassets",
    ".pbxproj",
    ".xcuserstate",
    ".plist",
    ".lock",
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".pdf",
    ".storyboard",
    ".xib",
    ".md",
    ".json",
    ".yaml",
    ".yml",
];

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "PRVET_PROVIDER";
pub const ENV_INLINE_MODEL: &str = "PRVET_INLINE_MODEL";
pub const ENV_SUMMARY_MODEL: &str = "PRVET_SUMMARY_MODEL";
pub const ENV_API_KEY: &str = "PRVET_API_KEY";
pub const ENV_BASE_URL: &str = "PRVET_BASE_URL";

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_PR_NUMBER: &str = "PR_NUMBER";
pub const ENV_COMMIT_SHA: &str = "PR_HEAD_SHA";
