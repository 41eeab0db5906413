//! Discover, select and download pipeline.
//!
//! [`run`] drives the renderer, the link extractor, the range filter and the
//! download engine in order, writing the human-readable report to `out` and
//! reading prompt answers from `input`.

pub mod prompt;
pub mod report;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{DEFAULT_RANGE_END, DEFAULT_RANGE_START, RunConfig};
use crate::download::{DownloadEngine, DownloadStats, Downloader};
use crate::listing::{LinkRecord, SequenceRange, annotate, extract_links, filter_and_sort};
use crate::render::ListingRenderer;
use crate::sequence::SequenceInference;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// The listing yielded no matching links (or never populated).
    NoListing,
    /// Links were found but none fell inside the range.
    NoneInRange {
        /// The range that was applied.
        range: SequenceRange,
    },
    /// `dry_run` was set; nothing was downloaded.
    DryRun {
        /// Records that would have been downloaded, in download order.
        selected: Vec<LinkRecord>,
    },
    /// The user declined the download.
    Cancelled,
    /// The batch ran.
    Completed(DownloadStats),
}

/// Runs the whole pipeline once.
///
/// Only a browser that cannot be started aborts the run; a listing that never
/// populates is reported as [`RunSummary::NoListing`], and per-file download
/// failures are counted in the returned stats.
///
/// # Errors
///
/// Returns an error if the browser cannot be launched or if reading prompts
/// or writing the report fails.
pub async fn run<R, W>(
    config: &RunConfig,
    renderer: &dyn ListingRenderer,
    downloader: &Downloader,
    input: &mut R,
    out: &mut W,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    report::banner(out)?;
    writeln!(out, "\nStep 1: Scraping website for all CSV files...")?;

    let anchors = match renderer.render(&config.listing_url).await {
        Ok(anchors) => anchors,
        Err(error) if error.is_fatal() => {
            return Err(error).context("cannot render the listing page");
        }
        Err(error) => {
            warn!(error = %error, "listing render failed");
            writeln!(out, "Error scraping website: {error}")?;
            Vec::new()
        }
    };

    let inference = SequenceInference::with_upper_bound(config.max_sequence);
    let records = annotate(extract_links(&anchors, &config.extension), &inference);
    report::link_counts(out, anchors.len(), records.len())?;
    info!(anchors = anchors.len(), files = records.len(), "listing scraped");

    if records.is_empty() {
        writeln!(
            out,
            "No CSV files found. The website might be down or the structure changed."
        )?;
        return Ok(RunSummary::NoListing);
    }

    report::full_listing(out, &records)?;

    writeln!(out)?;
    let start = match config.start {
        Some(start) => start,
        None => prompt::prompt_bound(input, out, "start", DEFAULT_RANGE_START)?,
    };
    let end = match config.end {
        Some(end) => end,
        None => prompt::prompt_bound(input, out, "end", DEFAULT_RANGE_END)?,
    };
    let range = SequenceRange::new(start, end);

    report::sample(out, &records, range)?;
    let selected = filter_and_sort(records, range, &inference);
    report::selection(out, &selected, range)?;

    if selected.is_empty() {
        return Ok(RunSummary::NoneInRange { range });
    }

    if config.dry_run {
        return Ok(RunSummary::DryRun { selected });
    }

    if !config.assume_yes {
        writeln!(out)?;
        let question = format!("Download these {} files?", selected.len());
        if !prompt::prompt_confirm(input, out, &question)? {
            writeln!(out, "Download cancelled.")?;
            return Ok(RunSummary::Cancelled);
        }
    }

    writeln!(out, "\nStep 3: Downloading {} files...", selected.len())?;
    let engine = DownloadEngine::new(config.inter_download_delay);
    let mut write_result = Ok(());
    let stats = engine
        .process(downloader, &selected, &config.output_dir, |i, n, record, outcome| {
            if write_result.is_ok() {
                write_result = report::outcome(out, i, n, record, outcome);
            }
        })
        .await;
    write_result?;

    report::summary(out, &stats, &config.output_dir)?;
    Ok(RunSummary::Completed(stats))
}
