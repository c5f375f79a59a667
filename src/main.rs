//! prvet — AI-assisted pull request reviewer.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use prvet::config::Config;
use prvet::constants;
use prvet::env::Env;
use prvet::github::GithubClient;
use prvet::pace::Pacer;
use prvet::providers::RigGenerator;
use prvet::report::Reporter;
use prvet::review::ReviewRunner;

use cli::args::{Cli, Command, ReviewArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Review(args) => run_review(*args, cli.quiet).await,
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green());
    Ok(())
}

/// Review the configured pull request and post the results.
async fn run_review(args: ReviewArgs, quiet: bool) -> Result<()> {
    let env = Env::real();
    let mut config =
        Config::load(Some(&args.path), &env).context("failed to load configuration")?;
    args.apply_to(&mut config);

    // Fatal preconditions: without these, nothing below can run.
    let settings = config.github.resolved()?;

    let host = GithubClient::new(&settings)?;
    let generator = RigGenerator::new(config.provider.clone())
        .context("failed to configure the LLM provider")?;

    let pacer = Pacer::new(config.review.api_delay());
    let reporter = Reporter::new(!quiet);

    let runner = ReviewRunner::new(
        Arc::new(host),
        Arc::new(generator),
        config,
        pacer,
        reporter,
    );
    runner.run().await.context("review run failed")?;
    Ok(())
}
