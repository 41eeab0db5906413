//! Link extraction from rendered anchors.

use tracing::{debug, instrument};

use super::{Anchor, LinkRecord};

/// Extension kept by default (case-sensitive).
pub const DEFAULT_EXTENSION: &str = ".csv";

/// Keeps anchors whose href ends with `extension` and turns them into records.
///
/// Matching is an exact, case-sensitive suffix test: `.CSV` links are not
/// picked up when `extension` is `.csv`. Page order is preserved.
///
/// # Examples
///
/// ```
/// use cycling_fetch_core::listing::{Anchor, extract_links};
///
/// let anchors = vec![
///     Anchor::new("https://example.com/usage-stats/246a-sep.csv", "246a-sep.csv"),
///     Anchor::new("https://example.com/about", "About"),
/// ];
/// let records = extract_links(&anchors, ".csv");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].filename, "246a-sep.csv");
/// ```
#[instrument(level = "debug", skip(anchors), fields(anchors = anchors.len()))]
#[must_use]
pub fn extract_links(anchors: &[Anchor], extension: &str) -> Vec<LinkRecord> {
    let records: Vec<LinkRecord> = anchors
        .iter()
        .filter(|anchor| !anchor.href.is_empty() && anchor.href.ends_with(extension))
        .filter_map(|anchor| {
            let filename = filename_from_href(&anchor.href)?;
            Some(LinkRecord::new(filename, &anchor.href, &anchor.text))
        })
        .collect();

    debug!(records = records.len(), "extracted file links");
    records
}

/// Returns the last non-empty `/`-separated segment of `href`.
#[must_use]
pub fn filename_from_href(href: &str) -> Option<&str> {
    href.split('/').rev().find(|segment| !segment.is_empty())
}
