//! CLI entry point for the cycling-fetch tool.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use cycling_fetch_core::{ChromeRenderer, Downloader, RunSummary, run};
use tracing::{debug, info};

mod cli;
mod progress;

use cli::Args;
use progress::{SpinnerRenderer, is_dumb_terminal, should_use_spinner};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn).
    // The report on stdout is the primary output, so info logs are opt-in.
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = args.to_run_config();
    let downloader =
        Downloader::with_timeout(config.download_timeout).context("failed to build HTTP client")?;
    let renderer = SpinnerRenderer::new(
        ChromeRenderer::new(config.render.clone()),
        should_use_spinner(io::stderr().is_terminal(), args.quiet, is_dumb_terminal()),
    );

    let mut input = io::stdin().lock();
    // With --json the report moves to stderr so stdout carries only the JSON.
    let summary = if args.json {
        run(&config, &renderer, &downloader, &mut input, &mut io::stderr().lock()).await?
    } else {
        run(&config, &renderer, &downloader, &mut input, &mut io::stdout().lock()).await?
    };

    if let RunSummary::DryRun { selected } = &summary
        && args.json
    {
        println!("{}", serde_json::to_string_pretty(selected)?);
    }

    info!(?summary, "run finished");
    Ok(())
}
