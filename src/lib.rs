//! Cycling Fetch Core Library
//!
//! This library discovers and downloads a numbered subset of the CSV files
//! published on a script-rendered data listing page (by default the TfL
//! cycling data index).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`render`] - Headless browser session and listing page rendering
//! - [`listing`] - Link extraction, range filtering and sorting
//! - [`sequence`] - Sequence-number inference from filenames
//! - [`download`] - Per-file HTTP downloads and the sequential batch loop
//! - [`app`] - Interactive pipeline that ties the pieces together
//! - [`config`] - Resolved run configuration and defaults

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod download;
pub mod listing;
pub mod render;
pub mod sequence;
mod user_agent;

// Re-export commonly used types
pub use app::{RunSummary, run};
pub use config::RunConfig;
pub use download::{DownloadError, DownloadOutcome, DownloadStats, Downloader};
pub use listing::{Anchor, LinkRecord, SequenceRange, annotate, extract_links, filter_and_sort};
pub use render::{ChromeRenderer, ListingRenderer, RenderError, RenderOptions};
pub use sequence::{DEFAULT_UPPER_BOUND, SequenceInference, SequenceRule};
