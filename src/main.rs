mod config;
mod history;
mod models;
mod normalize;
mod scrapers;
mod sink;

use chrono::Local;
use clap::Parser;
use config::{Args, FetcherKind, Settings};
use scrapers::{ChromeFetcher, HttpFetcher, PageFetcher};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    info!("🏠 Suburb Scout - realestate.com.au scraper");

    // Dropping the fetcher releases the browser on every exit path
    let fetcher: Box<dyn PageFetcher> = match settings.fetcher {
        FetcherKind::Chrome => Box::new(ChromeFetcher::launch(
            settings.headless,
            settings.render_wait,
        )?),
        FetcherKind::Http => Box::new(HttpFetcher::new(settings.http_timeout)?),
    };

    let scraped_date = Local::now().date_naive();
    let summary = scrapers::run(
        fetcher.as_ref(),
        &args.suburbs,
        args.pages,
        &args.output,
        scraped_date,
    )
    .await?;

    info!(
        pages = summary.pages,
        cards = summary.cards,
        listings = summary.written,
        skipped = summary.skipped,
        "📄 Scraping complete. Data saved to {}",
        args.output.display()
    );

    Ok(())
}
