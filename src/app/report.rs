//! Human-readable run report.
//!
//! Not a machine contract; the counts and per-file outcomes it shows are.

use std::io::{self, Write};
use std::path::Path;

use indicatif::HumanCount;

use crate::download::{DownloadError, DownloadOutcome, DownloadStats};
use crate::listing::{LinkRecord, SequenceRange};

/// Width of the banner and summary rules.
const RULE_WIDTH: usize = 50;

/// Number of filename mappings shown before filtering.
pub const SAMPLE_SIZE: usize = 10;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn number_or_none(number: Option<u64>) -> String {
    number.map_or_else(|| "None".to_string(), |n| n.to_string())
}

pub(crate) fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "TfL Cycling Data Scraper")?;
    writeln!(out, "{}", rule())
}

pub(crate) fn link_counts<W: Write>(out: &mut W, anchors: usize, files: usize) -> io::Result<()> {
    writeln!(out, "Found {anchors} total links on page")?;
    writeln!(out, "Found {files} CSV files")
}

/// Full listing with the inferred number of every record.
pub(crate) fn full_listing<W: Write>(out: &mut W, records: &[LinkRecord]) -> io::Result<()> {
    writeln!(out, "\nStep 2: Found {} CSV files total", records.len())?;
    writeln!(out, "\nAll files found:")?;
    for (index, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:3}. {} (File #: {})",
            index + 1,
            record.filename,
            number_or_none(record.sequence_number)
        )?;
    }
    Ok(())
}

pub(crate) fn sample<W: Write>(
    out: &mut W,
    records: &[LinkRecord],
    range: SequenceRange,
) -> io::Result<()> {
    writeln!(out, "\nAnalyzing filenames to find files {range}...")?;
    writeln!(out, "Sample filenames found:")?;
    for record in records.iter().take(SAMPLE_SIZE) {
        writeln!(
            out,
            "  {} -> File number: {}",
            record.filename,
            number_or_none(record.sequence_number)
        )?;
    }
    writeln!(out, "\nFiltering files in range {range}...")
}

pub(crate) fn selection<W: Write>(
    out: &mut W,
    selected: &[LinkRecord],
    range: SequenceRange,
) -> io::Result<()> {
    writeln!(out, "Found {} files in range {range}", selected.len())?;
    if selected.is_empty() {
        writeln!(out, "No files found in range {range}")?;
        return writeln!(
            out,
            "You might need to adjust the filtering logic based on the actual filename patterns."
        );
    }

    writeln!(out, "\nFiles to download ({} files):", selected.len())?;
    for record in selected {
        writeln!(
            out,
            "  {:>3}. {}",
            number_or_none(record.sequence_number),
            record.filename
        )?;
    }
    Ok(())
}

/// One status line per file.
pub(crate) fn outcome<W: Write>(
    out: &mut W,
    index: usize,
    total: usize,
    record: &LinkRecord,
    outcome: &DownloadOutcome,
) -> io::Result<()> {
    let name = &record.filename;
    let status = match outcome {
        DownloadOutcome::Downloaded { bytes, .. } => {
            format!("✓ Downloaded: {name} ({} bytes)", HumanCount(*bytes))
        }
        DownloadOutcome::Skipped { .. } => format!("✓ Already exists: {name}"),
        DownloadOutcome::Failed(DownloadError::HttpStatus { status, .. }) => {
            format!("✗ Failed: {name} (HTTP {status})")
        }
        DownloadOutcome::Failed(error) => format!("✗ Error downloading {name}: {error}"),
    };
    writeln!(out, "[{index}/{total}] {status}")
}

pub(crate) fn summary<W: Write>(
    out: &mut W,
    stats: &DownloadStats,
    output_dir: &Path,
) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "Download Complete!")?;
    if stats.skipped() > 0 {
        writeln!(
            out,
            "✓ Successful: {} ({} already present)",
            stats.succeeded(),
            stats.skipped()
        )?;
    } else {
        writeln!(out, "✓ Successful: {}", stats.succeeded())?;
    }
    writeln!(out, "✗ Failed: {}", stats.failed())?;
    writeln!(out, "Files saved to: {}", output_dir.display())
}
