use crate::scrapers::traits::PageFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Page fetcher backed by a single Chrome session.
///
/// The browser and its one tab are reused for every page. Chrome is shut down
/// when the fetcher is dropped.
pub struct ChromeFetcher {
    // Keeps the Chrome process alive for as long as the tab is in use
    _browser: Browser,
    tab: Arc<Tab>,
    render_wait: Duration,
}

impl ChromeFetcher {
    /// Launch Chrome and open the tab used for all navigation
    pub fn launch(headless: bool, render_wait: Duration) -> Result<Self> {
        info!("Launching Chrome (headless: {})...", headless);

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .window_size(Some((1920, 1080)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        Ok(Self {
            _browser: browser,
            tab,
            render_wait,
        })
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        self.tab
            .wait_until_navigated()
            .with_context(|| format!("Navigation to {} did not complete", url))?;

        // Results are rendered client-side after navigation finishes
        tokio::time::sleep(self.render_wait).await;

        let html_result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .context("Failed to read page HTML")?;

        let html = match html_result.value {
            Some(value) => value.as_str().unwrap_or("").to_string(),
            None => {
                warn!("Could not get HTML from {}", url);
                String::new()
            }
        };

        debug!("Read {} bytes of HTML", html.len());
        Ok(html)
    }

    fn name(&self) -> &'static str {
        "chrome"
    }
}
