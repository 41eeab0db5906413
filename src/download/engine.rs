//! Sequential batch download with a fixed pause between files.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::client::{DownloadOutcome, Downloader};
use super::constants::DEFAULT_INTER_DOWNLOAD_DELAY;
use crate::listing::LinkRecord;

/// Tallies for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DownloadStats {
    downloaded: usize,
    skipped: usize,
    failed: usize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files fetched and written.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Returns the number of files skipped because they already existed.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns downloaded plus skipped: every file now present locally.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.downloaded + self.skipped
    }

    /// Returns the total number of records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.failed
    }

    /// Counts one outcome.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { .. } => self.downloaded += 1,
            DownloadOutcome::Skipped { .. } => self.skipped += 1,
            DownloadOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives a batch of downloads one file at a time.
///
/// No retries and no parallelism: each record gets exactly one attempt, and
/// the engine sleeps `delay` between consecutive records as a politeness
/// throttle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEngine {
    delay: Duration,
}

impl Default for DownloadEngine {
    fn default() -> Self {
        Self::new(DEFAULT_INTER_DOWNLOAD_DELAY)
    }
}

impl DownloadEngine {
    /// Creates an engine that pauses `delay` between files.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Downloads every record in order and returns the tallies.
    ///
    /// `on_outcome` is called after each file with the 1-based index, the
    /// batch size, the record and its outcome.
    #[instrument(skip_all, fields(records = records.len(), output_dir = %output_dir.display()))]
    pub async fn process<F>(
        &self,
        downloader: &Downloader,
        records: &[LinkRecord],
        output_dir: &Path,
        mut on_outcome: F,
    ) -> DownloadStats
    where
        F: FnMut(usize, usize, &LinkRecord, &DownloadOutcome),
    {
        let mut stats = DownloadStats::new();
        let total = records.len();

        for (index, record) in records.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                debug!(delay_ms = self.delay.as_millis(), "pausing between downloads");
                tokio::time::sleep(self.delay).await;
            }

            let outcome = downloader.download(record, output_dir).await;
            stats.record(&outcome);
            on_outcome(index + 1, total, record, &outcome);
        }

        info!(
            downloaded = stats.downloaded(),
            skipped = stats.skipped(),
            failed = stats.failed(),
            "batch finished"
        );
        stats
    }
}
