//! Resolved run configuration.
//!
//! There is no config file; the binary builds a [`RunConfig`] from its
//! command-line flags and everything else falls back to the defaults here.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::constants::{DEFAULT_INTER_DOWNLOAD_DELAY, DOWNLOAD_TIMEOUT_SECS};
use crate::listing::DEFAULT_EXTENSION;
use crate::render::RenderOptions;
use crate::sequence::DEFAULT_UPPER_BOUND;

/// Default listing page (TfL cycling data index).
pub const DEFAULT_LISTING_URL: &str = "https://cycling.data.tfl.gov.uk/";

/// Default download directory.
pub const DEFAULT_OUTPUT_DIR: &str = "cycling_data";

/// Default first sequence number offered at the prompt.
pub const DEFAULT_RANGE_START: u64 = 246;

/// Default last sequence number offered at the prompt.
pub const DEFAULT_RANGE_END: u64 = 386;

/// Everything a run needs, already resolved from flags and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Listing page to render.
    pub listing_url: String,
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
    /// Link suffix to keep (case-sensitive).
    pub extension: String,
    /// Browser and wait settings.
    pub render: RenderOptions,
    /// Whole-request timeout per download.
    pub download_timeout: Duration,
    /// Pause between consecutive downloads.
    pub inter_download_delay: Duration,
    /// Upper bound for the bounded digit-run inference rule.
    pub max_sequence: u64,
    /// Range start; prompted for when `None`.
    pub start: Option<u64>,
    /// Range end; prompted for when `None`.
    pub end: Option<u64>,
    /// Skip the download confirmation.
    pub assume_yes: bool,
    /// Stop after showing the selection.
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            render: RenderOptions::default(),
            download_timeout: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
            inter_download_delay: DEFAULT_INTER_DOWNLOAD_DELAY,
            max_sequence: DEFAULT_UPPER_BOUND,
            start: None,
            end: None,
            assume_yes: false,
            dry_run: false,
        }
    }
}
