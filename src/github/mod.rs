//! GitHub pull-request collaborator.
//!
//! The review pipeline only needs three operations from the hosting
//! service, expressed as the [`PullRequestHost`] trait so tests can swap
//! in a recording fake. The real implementation lives in [`api`].

pub mod api;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChangedFile;

pub use api::GithubClient;

/// Errors from the hosting API.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),
}

/// Outcome of posting a comment.
///
/// Distinguishes the two response codes the pipeline reacts to from a
/// plain success; anything else surfaces as a [`HostError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// The comment was created.
    Created,
    /// Validation-layer rejection: the line is not part of the diff.
    /// Expected when the context and valid-line views disagree upstream;
    /// never retried.
    LineNotInDiff,
    /// The service signaled rate limiting; back off and continue.
    RateLimited,
}

/// The hosting-service operations the review pipeline consumes.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// List the files changed in the pull request.
    async fn list_changed_files(&self) -> Result<Vec<ChangedFile>, HostError>;

    /// Create an inline review comment on a destination-file line.
    async fn post_line_comment(
        &self,
        filename: &str,
        line: u32,
        body: &str,
    ) -> Result<PostOutcome, HostError>;

    /// Create a PR-level (issue) comment.
    async fn post_summary_comment(&self, body: &str) -> Result<PostOutcome, HostError>;
}
