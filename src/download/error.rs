//! Why a single file could not be fetched.
//!
//! Every per-file failure is one of these variants. None of them aborts a
//! batch; the engine records them and moves on to the next file.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of one record's fetch.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// DNS, connect, TLS or body-read failure.
    #[error("request to {url} failed: {source}")]
    Network {
        /// Requested file URL.
        url: String,
        /// Transport error from the HTTP client.
        #[source]
        source: reqwest::Error,
    },

    /// No complete response within the client timeout.
    #[error("timed out fetching {url}")]
    Timeout {
        /// Requested file URL.
        url: String,
    },

    /// Any response status other than 200.
    #[error("{url} answered with status {status}")]
    HttpStatus {
        /// Requested file URL.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// Output directory or file could not be written.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Directory or file being written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record's URL could not be parsed.
    #[error("unparseable file URL '{url}'")]
    InvalidUrl {
        /// The href as scraped.
        url: String,
    },
}

impl DownloadError {
    /// Wraps a transport error for `url`.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a network or timeout error depending on the reqwest error kind.
    pub fn from_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }

    /// Non-200 response for `url`.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Timeout for `url`.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Write failure at `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Record URL that does not parse.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Returns the HTTP status for [`DownloadError::HttpStatus`].
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether this failure happened below the HTTP layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::InvalidUrl { .. }
        )
    }
}

// No From<reqwest::Error>/From<std::io::Error>: every variant needs the url
// or path the source error does not carry. Use the constructors above.
