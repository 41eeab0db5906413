//! HTTP client wrapper for downloading listing files.
//!
//! This module provides the [`Downloader`] which fetches a single
//! [`LinkRecord`] into a target directory, skipping files that are already
//! present.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::DOWNLOAD_TIMEOUT_SECS;
use super::error::DownloadError;
use crate::listing::LinkRecord;
use crate::user_agent;

/// Result of downloading one record.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The body was fetched and written.
    Downloaded {
        /// Written file.
        path: PathBuf,
        /// Body size in bytes.
        bytes: u64,
    },
    /// A file with the same name already existed; nothing was fetched.
    Skipped {
        /// Existing file.
        path: PathBuf,
    },
    /// The download failed and no file was written.
    Failed(DownloadError),
}

impl DownloadOutcome {
    /// Returns whether the file is present locally after this outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// HTTP client for downloading listing files.
///
/// Created once and reused for the whole batch so connections are pooled.
///
/// # Example
///
/// ```no_run
/// use cycling_fetch_core::download::{DownloadOutcome, Downloader};
/// use cycling_fetch_core::listing::LinkRecord;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = Downloader::new()?;
/// let record = LinkRecord::new(
///     "246JourneyDataExtract.csv",
///     "https://cycling.data.tfl.gov.uk/usage-stats/246JourneyDataExtract.csv",
///     "",
/// );
/// if let DownloadOutcome::Downloaded { bytes, .. } =
///     downloader.download(&record, Path::new("cycling_data")).await
/// {
///     println!("{bytes} bytes");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Creates a downloader with the default 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
    }

    /// Creates a downloader with an explicit whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be initialised.
    #[instrument(level = "debug", fields(timeout_secs = timeout.as_secs()))]
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent::default_download_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `record` into `target_dir` under its own filename.
    ///
    /// The directory is created if missing. An existing file at the target
    /// path short-circuits to [`DownloadOutcome::Skipped`] without any network
    /// request; its contents are not inspected. Only a 200 response is
    /// written; every other status, and every transport failure, yields
    /// [`DownloadOutcome::Failed`] with nothing on disk.
    #[instrument(skip(self, record), fields(filename = %record.filename, url = %record.url))]
    pub async fn download(&self, record: &LinkRecord, target_dir: &Path) -> DownloadOutcome {
        match self.try_download(record, target_dir).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(error = %error, "download failed");
                DownloadOutcome::Failed(error)
            }
        }
    }

    async fn try_download(
        &self,
        record: &LinkRecord,
        target_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| DownloadError::io(target_dir, e))?;

        let path = target_dir.join(&record.filename);
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;
        if exists {
            debug!(path = %path.display(), "file already present, skipping");
            return Ok(DownloadOutcome::Skipped { path });
        }

        Url::parse(&record.url).map_err(|_| DownloadError::invalid_url(&record.url))?;

        debug!("starting download");
        let response = self
            .client
            .get(&record.url)
            .send()
            .await
            .map_err(|e| DownloadError::from_transport(&record.url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(&record.url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DownloadError::from_transport(&record.url, e))?;

        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        let bytes = body.len() as u64;
        info!(path = %path.display(), bytes, "download complete");
        Ok(DownloadOutcome::Downloaded { path, bytes })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_existing_file_is_skipped_without_request() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("246a-sep.csv");
        std::fs::write(&existing, b"old bytes").unwrap();

        // Port 9 (discard) on localhost: any request would fail, so a skip proves no fetch.
        let record = LinkRecord::new("246a-sep.csv", "http://127.0.0.1:9/246a-sep.csv", "");
        let outcome = Downloader::new()
            .unwrap()
            .download(&record, temp_dir.path())
            .await;

        assert!(matches!(outcome, DownloadOutcome::Skipped { ref path } if *path == existing));
        assert_eq!(std::fs::read(&existing).unwrap(), b"old bytes");
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let record = LinkRecord::new("x.csv", "not a url/x.csv", "");
        let outcome = Downloader::new()
            .unwrap()
            .download(&record, temp_dir.path())
            .await;

        assert!(matches!(
            outcome,
            DownloadOutcome::Failed(DownloadError::InvalidUrl { .. })
        ));
        assert!(!temp_dir.path().join("x.csv").exists());
    }

    #[tokio::test]
    async fn test_missing_target_dir_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let fresh = temp_dir.path().join("fresh").join("dir");
        let record = LinkRecord::new("2a.csv", "not a url", "");
        let _ = Downloader::new().unwrap().download(&record, &fresh).await;
        assert!(fresh.is_dir(), "target directory should be created first");
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(
            DownloadOutcome::Skipped {
                path: PathBuf::from("a")
            }
            .is_success()
        );
        assert!(!DownloadOutcome::Failed(DownloadError::timeout("u")).is_success());
    }
}
