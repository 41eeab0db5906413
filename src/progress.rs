//! Progress UI (spinner) while the listing page renders.

use std::time::Duration;

use async_trait::async_trait;
use cycling_fetch_core::listing::Anchor;
use cycling_fetch_core::{ListingRenderer, RenderError};
use indicatif::{ProgressBar, ProgressStyle};

/// Whether a spinner can be drawn without corrupting piped or quiet output.
pub(crate) fn should_use_spinner(stderr_is_terminal: bool, quiet: bool, dumb_terminal: bool) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

/// Wraps a renderer with a stderr spinner for the duration of the render.
pub(crate) struct SpinnerRenderer<R> {
    inner: R,
    enabled: bool,
}

impl<R> SpinnerRenderer<R> {
    pub(crate) fn new(inner: R, enabled: bool) -> Self {
        Self { inner, enabled }
    }
}

#[async_trait]
impl<R: ListingRenderer> ListingRenderer for SpinnerRenderer<R> {
    async fn render(&self, url: &str) -> Result<Vec<Anchor>, RenderError> {
        if !self.enabled {
            return self.inner.render(url).await;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Rendering {url}..."));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.inner.render(url).await;
        spinner.finish_and_clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl ListingRenderer for Fixed {
        async fn render(&self, url: &str) -> Result<Vec<Anchor>, RenderError> {
            Ok(vec![Anchor::new(format!("{url}1a.csv"), "1a.csv")])
        }
    }

    #[test]
    fn test_should_use_spinner_only_on_interactive_stderr() {
        assert!(should_use_spinner(true, false, false));
        assert!(!should_use_spinner(false, false, false));
        assert!(!should_use_spinner(true, true, false));
        assert!(!should_use_spinner(true, false, true));
    }

    #[tokio::test]
    async fn test_spinner_renderer_passes_result_through() {
        for enabled in [false, true] {
            let renderer = SpinnerRenderer::new(Fixed, enabled);
            let anchors = renderer.render("https://h/").await.unwrap();
            assert_eq!(anchors, vec![Anchor::new("https://h/1a.csv", "1a.csv")]);
        }
    }
}
