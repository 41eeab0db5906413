//! Constants for the download module (timeouts, pacing).

use std::time::Duration;

/// Default whole-request HTTP timeout per file (30 seconds).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default pause between consecutive files in a batch.
pub const DEFAULT_INTER_DOWNLOAD_DELAY: Duration = Duration::from_secs(1);
