//! Listing records: link extraction from rendered anchors and range selection.
//!
//! The flow is [`extract_links`] over the anchors returned by the renderer,
//! then [`filter_and_sort`] to keep the records whose inferred sequence number
//! falls inside a [`SequenceRange`].

mod extract;
mod filter;

use serde::{Deserialize, Serialize};

pub use extract::{DEFAULT_EXTENSION, extract_links, filename_from_href};
pub use filter::{SequenceRange, annotate, filter_and_sort};

/// An anchor element as read from the rendered listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Resolved link target.
    pub href: String,
    /// Visible link text, trimmed.
    #[serde(default)]
    pub text: String,
}

impl Anchor {
    /// Creates an anchor from an href and display text.
    #[must_use]
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// A downloadable file discovered on the listing page.
///
/// Records carry no identity beyond `filename`; two records with the same
/// filename are both kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Final path segment of the link target.
    pub filename: String,
    /// Absolute download URL.
    pub url: String,
    /// Link text shown on the page.
    pub display_text: String,
    /// Inferred sequence number, attached during filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
}

impl LinkRecord {
    /// Creates a record with no sequence number attached yet.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        url: impl Into<String>,
        display_text: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            url: url.into(),
            display_text: display_text.into(),
            sequence_number: None,
        }
    }
}
