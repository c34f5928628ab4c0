use anyhow::Result;
use async_trait::async_trait;

/// Source of rendered search-result pages.
/// Implementations handle navigation and any waiting needed for the page to render.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the rendered document HTML
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Get the name of the fetcher backend
    fn name(&self) -> &'static str;
}
