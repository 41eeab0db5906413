//! Listing page rendering in a headless browser.
//!
//! The listing is populated client-side, so a plain GET returns no links. The
//! [`ChromeRenderer`] launches a [`BrowserSession`], waits for the page to
//! fill in and returns every anchor on it. The session is closed on every
//! exit path of [`ListingRenderer::render`].

mod error;
mod session;

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

pub use error::RenderError;
pub use session::BrowserSession;

use crate::listing::Anchor;

/// Default bound on navigation plus the first-anchor wait.
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Default extra wait after the first anchor appears.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(10);

/// Browser and wait settings for a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Bound on navigation plus the wait for the first anchor.
    pub page_load_timeout: Duration,
    /// Fixed delay after the first anchor so deferred scripts can finish.
    pub settle_delay: Duration,
    /// Launch a visible browser window instead of headless.
    pub show_browser: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            show_browser: false,
        }
    }
}

/// Source of the anchors on a listing page.
#[async_trait]
pub trait ListingRenderer: Send + Sync {
    /// Renders `url` and returns its anchors in page order.
    async fn render(&self, url: &str) -> Result<Vec<Anchor>, RenderError>;
}

/// Renders listings with a fresh Chromium session per call.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    options: RenderOptions,
}

impl ChromeRenderer {
    /// Creates a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Returns the renderer's options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

#[async_trait]
impl ListingRenderer for ChromeRenderer {
    #[instrument(skip(self), fields(url = %url))]
    async fn render(&self, url: &str) -> Result<Vec<Anchor>, RenderError> {
        let session = BrowserSession::launch(&self.options).await?;
        let result = session.render_listing(url, &self.options).await;
        session.close().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.page_load_timeout, Duration::from_secs(60));
        assert_eq!(options.settle_delay, Duration::from_secs(10));
        assert!(!options.show_browser);
    }

    #[test]
    fn test_chrome_renderer_keeps_options() {
        let options = RenderOptions {
            show_browser: true,
            ..RenderOptions::default()
        };
        assert!(ChromeRenderer::new(options).options().show_browser);
    }
}
