//! Headless browser session and the listing scrape that runs inside it.

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig, BrowserConfigBuilder};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

use super::RenderOptions;
use super::error::RenderError;
use crate::listing::Anchor;

/// How often the anchor-presence condition is re-checked.
const ANCHOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium launch flags.
///
/// chromiumoxide's built-in defaults minus `--enable-automation`, plus
/// `--disable-blink-features=AutomationControlled`. Passed with default args
/// disabled so the automation switch never reaches the browser.
const BROWSER_ARGS: [&str; 25] = [
    "--disable-background-networking",
    "--enable-features=NetworkService,NetworkServiceInProcess",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-extensions-with-background-pages",
    "--disable-default-apps",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--disable-features=TranslateUI",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-sync",
    "--force-color-profile=srgb",
    "--metrics-recording-only",
    "--no-first-run",
    "--password-store=basic",
    "--use-mock-keychain",
    "--enable-blink-features=IdleDetection",
    "--lang=en_US",
    "--disable-blink-features=AutomationControlled",
];

/// Hides `navigator.webdriver` on every document the page loads.
const HIDE_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })";

/// Collects every anchor as `{ href, text }`; `href` is the resolved DOM property.
const COLLECT_ANCHORS_SCRIPT: &str = "Array.from(document.querySelectorAll('a'), a => \
     ({ href: a.href, text: (a.innerText || '').trim() }))";

/// A launched browser plus the task pumping its CDP connection.
///
/// Created with [`BrowserSession::launch`] and released with
/// [`BrowserSession::close`]. Dropping an unclosed session aborts the handler
/// task; chromiumoxide's `Browser` kills its child process on drop.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
}

impl BrowserSession {
    /// Launches a browser configured from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Setup`] if the configuration is rejected or no
    /// browser executable can be started.
    #[instrument(level = "debug", skip_all, fields(show_browser = options.show_browser))]
    pub async fn launch(options: &RenderOptions) -> Result<Self, RenderError> {
        let config = browser_config(options).build().map_err(RenderError::setup)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(RenderError::setup)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(error) = event {
                    trace!(error = %error, "CDP handler event error");
                }
            }
        });

        debug!("browser launched");
        Ok(Self {
            browser: Some(browser),
            handler: Some(handler),
        })
    }

    /// Loads `url`, waits for the listing to populate and returns its anchors.
    ///
    /// The wait has two phases: poll until at least one `a` element exists
    /// (bounded by `options.page_load_timeout`, navigation included), then
    /// sleep `options.settle_delay` so deferred scripts can finish filling the
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Timeout`] if no anchor appears in time,
    /// [`RenderError::Navigation`] if the page cannot be opened and
    /// [`RenderError::Script`] if the anchors cannot be read.
    #[instrument(skip(self, options), fields(url = %url))]
    pub async fn render_listing(
        &self,
        url: &str,
        options: &RenderOptions,
    ) -> Result<Vec<Anchor>, RenderError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| RenderError::setup("browser session already closed"))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::navigation(url, e))?;

        let result = scrape_page(&page, url, options).await;

        if let Err(error) = page.close().await {
            debug!(error = %error, "failed to close listing page");
        }
        result
    }

    /// Closes the browser and stops the handler task.
    ///
    /// Close failures are logged; if the graceful close fails the child
    /// process is killed.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            match browser.close().await {
                Ok(_) => {
                    if let Err(error) = browser.wait().await {
                        debug!(error = %error, "failed to reap browser process");
                    }
                }
                Err(error) => {
                    warn!(error = %error, "browser close failed, killing process");
                    if let Some(Err(error)) = browser.kill().await {
                        warn!(error = %error, "failed to kill browser process");
                    }
                }
            }
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        debug!("browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if self.browser.take().is_some() {
            warn!("browser session dropped without close");
        }
    }
}

fn browser_config(options: &RenderOptions) -> BrowserConfigBuilder {
    let builder = BrowserConfig::builder()
        .disable_default_args()
        .args(BROWSER_ARGS)
        .no_sandbox()
        .request_timeout(options.page_load_timeout);
    if options.show_browser {
        builder.with_head()
    } else {
        builder
    }
}

async fn scrape_page(
    page: &Page,
    url: &str,
    options: &RenderOptions,
) -> Result<Vec<Anchor>, RenderError> {
    page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
        HIDE_WEBDRIVER_SCRIPT,
    ))
    .await
    .map_err(|e| RenderError::navigation(url, e))?;

    info!("loading listing page");
    let wait_for_anchor = async {
        page.goto(url)
            .await
            .map_err(|e| RenderError::navigation(url, e))?;
        while page.find_element("a").await.is_err() {
            tokio::time::sleep(ANCHOR_POLL_INTERVAL).await;
        }
        Ok::<(), RenderError>(())
    };
    tokio::time::timeout(options.page_load_timeout, wait_for_anchor)
        .await
        .map_err(|_| RenderError::timeout(url, options.page_load_timeout))??;

    info!(
        settle_secs = options.settle_delay.as_secs(),
        "waiting for file list to populate"
    );
    tokio::time::sleep(options.settle_delay).await;

    let raw: Vec<Value> = page
        .evaluate(COLLECT_ANCHORS_SCRIPT)
        .await
        .map_err(|e| RenderError::script(url, e))?
        .into_value()
        .map_err(|e| RenderError::script(url, e))?;

    let anchors = decode_anchors(raw);
    info!(anchors = anchors.len(), "collected links");
    Ok(anchors)
}

/// Decodes script output into anchors, skipping entries of the wrong shape.
///
/// An SVG `<a>` for instance reports `href` as an object rather than a
/// string; such entries are dropped individually.
pub(crate) fn decode_anchors(raw: Vec<Value>) -> Vec<Anchor> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Anchor>(value) {
            Ok(mut anchor) => {
                anchor.text = anchor.text.trim().to_string();
                Some(anchor)
            }
            Err(error) => {
                debug!(index, error = %error, "skipping malformed anchor");
                None
            }
        })
        .collect()
}
