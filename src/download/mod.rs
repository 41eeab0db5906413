//! HTTP downloads of listing files.
//!
//! This module fetches the selected records one at a time into a local
//! directory.
//!
//! # Features
//!
//! - Existence check before any request (present files are skipped)
//! - Whole-body fetch with a bounded request timeout (30s by default)
//! - Structured per-file outcomes instead of errors that abort the batch
//! - Fixed pause between consecutive files
//!
//! # Example
//!
//! ```no_run
//! use cycling_fetch_core::download::{DownloadEngine, Downloader};
//! use cycling_fetch_core::listing::LinkRecord;
//! use std::path::Path;
//!
//! # async fn example(records: Vec<LinkRecord>) -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new()?;
//! let stats = DownloadEngine::default()
//!     .process(&downloader, &records, Path::new("cycling_data"), |i, n, record, _| {
//!         println!("[{i}/{n}] {}", record.filename);
//!     })
//!     .await;
//! println!("{} ok, {} failed", stats.succeeded(), stats.failed());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;

pub use client::{DownloadOutcome, Downloader};
pub use engine::{DownloadEngine, DownloadStats};
pub use error::DownloadError;
