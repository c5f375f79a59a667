//! Review orchestration: sequential per-file pipeline plus the summary pass.
//!
//! Files are processed strictly one at a time, in listing order; the
//! suspension points are sequential so the shared rate-limit budget holds.
//! A per-file failure is reported and the loop proceeds. The summary pass
//! runs unconditionally at the end, inside its own failure boundary, so a
//! broken file review can never suppress it.

pub mod prompt;
pub mod validate;

use std::sync::Arc;

use thiserror::Error;

use crate::classify;
use crate::config::Config;
use crate::constants;
use crate::diff;
use crate::github::{HostError, PostOutcome, PullRequestHost};
use crate::models::pr::{review_skip_reason, ChangedFile};
use crate::pace::Pacer;
use crate::providers::{GenerationRequest, GeneratorError, TextGenerator};
use crate::report::{Reporter, RunReport};

/// Errors from the review pipeline.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("hosting API error: {0}")]
    Host(#[from] HostError),

    #[error("text generation error: {0}")]
    Generator(#[from] GeneratorError),
}

/// What happened to a single file.
enum FileOutcome {
    /// Nothing to review; already reported with a reason.
    Skipped,
    /// The inline pipeline ran; `comments` were created.
    Reviewed { comments: usize },
}

/// Drives the whole review of one pull request.
pub struct ReviewRunner {
    host: Arc<dyn PullRequestHost>,
    generator: Arc<dyn TextGenerator>,
    config: Config,
    pacer: Pacer,
    reporter: Reporter,
}

impl ReviewRunner {
    pub fn new(
        host: Arc<dyn PullRequestHost>,
        generator: Arc<dyn TextGenerator>,
        config: Config,
        pacer: Pacer,
        reporter: Reporter,
    ) -> Self {
        Self {
            host,
            generator,
            config,
            pacer,
            reporter,
        }
    }

    /// Review every changed file, then post the architectural summary.
    pub async fn run(&self) -> Result<RunReport, ReviewError> {
        let files = self.host.list_changed_files().await?;
        let mut report = RunReport {
            files_total: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            self.reporter.warn("no files found in pull request");
            self.reporter.finish(&report);
            return Ok(report);
        }

        let mut reviewable = Vec::new();
        for file in files {
            match review_skip_reason(&file, &self.config.review.exclude_patterns) {
                Some(reason) => {
                    self.reporter.skipped(&file.filename, &reason);
                    report.files_skipped += 1;
                }
                None => reviewable.push(file),
            }
        }

        if reviewable.is_empty() {
            report.summary_posted = self
                .post_summary_body(&prompt::nothing_reviewable_summary())
                .await;
            self.reporter.finish(&report);
            return Ok(report);
        }

        let total = reviewable.len();
        for (index, file) in reviewable.iter().enumerate() {
            match self.review_file(file, index + 1, total).await {
                Ok(FileOutcome::Reviewed { comments }) => {
                    report.files_reviewed += 1;
                    report.comments_posted += comments;
                }
                Ok(FileOutcome::Skipped) => report.files_skipped += 1,
                Err(e) => {
                    self.reporter
                        .warn(&format!("review of {} failed: {e}", file.filename));
                    report.files_skipped += 1;
                }
            }
        }

        // Unconditional final step: the summary must be attempted even when
        // some (or all) file reviews failed above.
        report.summary_posted = self.post_summary(&reviewable).await;

        self.reporter.finish(&report);
        Ok(report)
    }

    /// Inline-review one file: classify, parse, prompt, validate, post.
    async fn review_file(
        &self,
        file: &ChangedFile,
        index: usize,
        total: usize,
    ) -> Result<FileOutcome, ReviewError> {
        let Some(patch_text) = file.patch.as_deref() else {
            return Ok(FileOutcome::Skipped);
        };

        // Full content gives the classifier more signal than the patch;
        // an unreadable file falls back to the patch text alone.
        let path = self.config.review.workspace.join(&file.filename);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(_) => patch_text.to_string(),
        };
        let category = classify::classify(&file.filename, &content);
        self.reporter
            .reviewing(index, total, &file.filename, &category.to_string());

        let patch = diff::parse_patch(patch_text);
        if patch.malformed_hunks > 0 {
            self.reporter.warn(&format!(
                "{}: {} hunk header(s) did not parse; line numbers in those hunks are unreliable",
                file.filename, patch.malformed_hunks
            ));
        }
        if patch.is_empty() {
            self.reporter
                .skipped(&file.filename, "no context lines in patch");
            return Ok(FileOutcome::Skipped);
        }
        if patch.added_count() == 0 {
            self.reporter
                .skipped(&file.filename, "no added lines to review");
            return Ok(FileOutcome::Skipped);
        }

        let max_comments = self.config.review.max_comments_per_file;
        let system = prompt::system_message(category);
        let user = prompt::inline_prompt(&file.filename, &patch, max_comments);

        self.pacer.pause().await;
        let raw = self
            .generator
            .generate(GenerationRequest {
                system: &system,
                user: &user,
                model: &self.config.provider.inline_model,
                max_tokens: constants::INLINE_MAX_TOKENS,
                temperature: constants::INLINE_TEMPERATURE,
            })
            .await?;

        let comments = match validate::validate_suggestions(
            &file.filename,
            &raw,
            &patch.valid_lines,
            max_comments,
        ) {
            Ok(comments) => comments,
            Err(e) => {
                self.reporter.warn(&format!(
                    "{}: {e}; no inline comments posted",
                    file.filename
                ));
                return Ok(FileOutcome::Reviewed { comments: 0 });
            }
        };

        let mut posted = 0;
        for comment in &comments {
            self.pacer.pause().await;
            match self
                .host
                .post_line_comment(&comment.filename, comment.line_number, &comment.comment_text)
                .await?
            {
                PostOutcome::Created => {
                    posted += 1;
                    self.reporter.posted(&comment.filename, comment.line_number);
                }
                // Expected when context and valid-line views disagree
                // upstream; invalid routing, not transience. Never retried.
                PostOutcome::LineNotInDiff => {
                    self.reporter.warn(&format!(
                        "{}:{} rejected: line not in diff",
                        comment.filename, comment.line_number
                    ));
                }
                PostOutcome::RateLimited => {
                    self.reporter.warn("rate limited while posting; backing off");
                    self.pacer.backoff(constants::RATE_LIMIT_BACKOFF).await;
                }
            }
        }

        Ok(FileOutcome::Reviewed { comments: posted })
    }

    /// Generate and post the architectural summary. Never fails the run.
    async fn post_summary(&self, files: &[ChangedFile]) -> bool {
        self.pacer.pause().await;
        let analysis = self
            .generator
            .generate(GenerationRequest {
                system: prompt::SUMMARY_PERSONA,
                user: &prompt::summary_prompt(files),
                model: &self.config.provider.summary_model,
                max_tokens: constants::SUMMARY_MAX_TOKENS,
                temperature: constants::SUMMARY_TEMPERATURE,
            })
            .await;

        let commit_sha = self.config.github.commit_sha.clone().unwrap_or_default();
        let body = match analysis {
            Ok(text) => prompt::summary_comment_body(&text, &commit_sha),
            Err(e) => {
                self.reporter
                    .warn(&format!("summary generation failed: {e}"));
                prompt::fallback_summary(files, &e.to_string())
            }
        };

        if self.post_summary_body(&body).await {
            return true;
        }

        self.reporter.warn("retrying summary with simplified content");
        self.post_summary_body(&prompt::simplified_summary(files))
            .await
    }

    /// Post one summary body, retrying once after a rate-limit backoff.
    async fn post_summary_body(&self, body: &str) -> bool {
        self.pacer.pause().await;
        match self.host.post_summary_comment(body).await {
            Ok(PostOutcome::Created) => true,
            Ok(PostOutcome::RateLimited) => {
                self.reporter
                    .warn("rate limited while posting summary; backing off");
                self.pacer.backoff(constants::SUMMARY_RETRY_BACKOFF).await;
                matches!(
                    self.host.post_summary_comment(body).await,
                    Ok(PostOutcome::Created)
                )
            }
            Ok(PostOutcome::LineNotInDiff) => false,
            Err(e) => {
                self.reporter.warn(&format!("failed to post summary: {e}"));
                false
            }
        }
    }
}
