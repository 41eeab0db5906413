//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cycling_fetch_core::RunConfig;
use cycling_fetch_core::config::{DEFAULT_LISTING_URL, DEFAULT_OUTPUT_DIR};
use cycling_fetch_core::render::RenderOptions;
use cycling_fetch_core::sequence::DEFAULT_UPPER_BOUND;

/// Discover and download numbered CSV files from a data listing page.
///
/// Renders the listing in a headless browser, infers each file's sequence
/// number from its name and downloads the files inside the chosen range.
#[derive(Parser, Debug)]
#[command(name = "cycling-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Listing page to scrape
    #[arg(short = 'u', long, default_value = DEFAULT_LISTING_URL, value_parser = parse_http_url)]
    pub url: String,

    /// Directory to save files to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// First file number to download (prompted for when omitted)
    #[arg(short = 's', long)]
    pub start: Option<u64>,

    /// Last file number to download (prompted for when omitted)
    #[arg(short = 'e', long)]
    pub end: Option<u64>,

    /// Download without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show the selected files and exit without downloading
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the selection as JSON on stdout (report goes to stderr)
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Largest digit run accepted as a file number when no leading number is present
    #[arg(long, default_value_t = DEFAULT_UPPER_BOUND, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_sequence: u64,

    /// Seconds to wait for the listing's first link to appear (1-600)
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub page_timeout: u64,

    /// Extra seconds to wait after the first link appears (0-120)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(0..=120))]
    pub settle_secs: u64,

    /// Per-file download timeout in seconds (1-600)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timeout_secs: u64,

    /// Delay between downloads in milliseconds (0 to disable, max 60000)
    #[arg(short = 'l', long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: u64,

    /// Launch a visible browser window instead of headless
    #[arg(long)]
    pub show_browser: bool,
}

impl Args {
    /// Resolves the parsed flags into the library's run configuration.
    #[must_use]
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            listing_url: self.url.clone(),
            output_dir: self.output_dir.clone(),
            render: RenderOptions {
                page_load_timeout: Duration::from_secs(self.page_timeout),
                settle_delay: Duration::from_secs(self.settle_secs),
                show_browser: self.show_browser,
            },
            download_timeout: Duration::from_secs(self.timeout_secs),
            inter_download_delay: Duration::from_millis(self.delay_ms),
            max_sequence: self.max_sequence,
            start: self.start,
            end: self.end,
            assume_yes: self.yes,
            dry_run: self.dry_run,
            ..RunConfig::default()
        }
    }
}

fn parse_http_url(value: &str) -> Result<String, String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(value.to_string()),
        scheme => Err(format!("scheme '{scheme}' is not supported; use http:// or https://")),
    }
}
