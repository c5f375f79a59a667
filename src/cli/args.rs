//! Clap argument types and config merging.

use clap::Parser;
use std::path::PathBuf;

use prvet::config::Config;
use prvet::models::ProviderName;

/// AI-assisted pull request reviewer.
#[derive(Parser, Debug)]
#[command(name = "prvet", version = prvet::constants::VERSION)]
pub struct Cli {
    /// Suppress progress output on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review a pull request and post the results.
    Review(Box<ReviewArgs>),

    /// Print version information.
    Version,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Path to the checked-out repository (used to read full file contents).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Repository in owner/name form (default: $GITHUB_REPOSITORY).
    #[arg(long)]
    pub repo: Option<String>,

    /// Pull request number (default: $PR_NUMBER).
    #[arg(long)]
    pub pr: Option<u64>,

    /// Head commit SHA to anchor comments to (default: $PR_HEAD_SHA).
    #[arg(long)]
    pub commit_sha: Option<String>,

    /// LLM provider: anthropic, openai, gemini, groq, openai-compatible.
    #[arg(long)]
    pub provider: Option<ProviderName>,

    /// Model for per-file inline reviews.
    #[arg(long)]
    pub inline_model: Option<String>,

    /// Model for the architectural summary.
    #[arg(long)]
    pub summary_model: Option<String>,

    /// Maximum inline comments per file.
    #[arg(long)]
    pub max_comments: Option<usize>,

    /// Seconds to wait before every rate-limited API call.
    #[arg(long)]
    pub delay_secs: Option<f64>,
}

impl ReviewArgs {
    /// Apply CLI flags on top of the loaded config (highest priority).
    pub fn apply_to(&self, config: &mut Config) {
        config.review.workspace = self.path.clone();

        if let Some(ref repo) = self.repo {
            config.github.repository = Some(repo.clone());
        }
        if let Some(pr) = self.pr {
            config.github.pr_number = Some(pr);
        }
        if let Some(ref sha) = self.commit_sha {
            config.github.commit_sha = Some(sha.clone());
        }
        if let Some(provider) = self.provider {
            config.provider.name = provider;
        }
        if let Some(ref model) = self.inline_model {
            config.provider.inline_model = model.clone();
        }
        if let Some(ref model) = self.summary_model {
            config.provider.summary_model = model.clone();
        }
        if let Some(max) = self.max_comments {
            config.review.max_comments_per_file = max;
        }
        if let Some(secs) = self.delay_secs {
            config.review.api_delay_secs = secs;
        }
    }
}
