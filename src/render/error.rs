//! Error types for listing page rendering.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while rendering the listing page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The browser could not be configured or launched.
    #[error(
        "failed to start browser: {reason}\n  Suggestion: install Chrome or Chromium and make sure it is on PATH"
    )]
    Setup {
        /// Why the launch failed.
        reason: String,
    },

    /// No anchor element appeared before the page-load timeout.
    #[error("no links appeared on {url} within {}s", timeout.as_secs())]
    Timeout {
        /// The listing URL.
        url: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Navigation to the listing failed after the browser started.
    #[error("failed to load {url}: {reason}")]
    Navigation {
        /// The listing URL.
        url: String,
        /// The CDP error message.
        reason: String,
    },

    /// The anchor-collection script failed or returned an unexpected shape.
    #[error("failed to read links from {url}: {reason}")]
    Script {
        /// The listing URL.
        url: String,
        /// The evaluation or decoding error.
        reason: String,
    },
}

impl RenderError {
    /// Creates a setup error.
    pub fn setup(reason: impl ToString) -> Self {
        Self::Setup {
            reason: reason.to_string(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout,
        }
    }

    /// Creates a navigation error.
    pub fn navigation(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a script error.
    pub fn script(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Script {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns whether the run must abort rather than report an empty listing.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }
}
