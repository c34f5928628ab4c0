use crate::history::History;
use crate::models::ListingRecord;
use crate::scrapers::listing::ListingExtractor;
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::SearchParams;
use crate::sink::ListingSink;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use scraper::Html;
use std::io::Write;
use std::ops::AddAssign;
use std::path::Path;
use tracing::{info, warn};

/// Counters for one suburb, or summed over a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub pages: u32,
    pub cards: usize,
    pub written: usize,
    pub skipped: usize,
}

impl AddAssign for ScrapeSummary {
    fn add_assign(&mut self, other: Self) {
        self.pages += other.pages;
        self.cards += other.cards;
        self.written += other.written;
        self.skipped += other.skipped;
    }
}

/// Everything a suburb scrape reads from but does not own
pub struct ScrapeContext<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub extractor: &'a ListingExtractor,
    pub params: &'a SearchParams,
    pub history: &'a History,
    pub scraped_date: NaiveDate,
}

/// Scrape pages `1..=pages` for `suburb`, appending one row per listing.
///
/// A card that cannot be read is logged and skipped. Fetch and write errors
/// abort the scrape.
pub async fn scrape_suburb<W: Write>(
    ctx: &ScrapeContext<'_>,
    sink: &mut ListingSink<W>,
    suburb: &str,
    pages: u32,
) -> Result<ScrapeSummary> {
    let mut summary = ScrapeSummary::default();

    for page in 1..=pages {
        let url = ctx.params.page_url(suburb, page);
        let html = ctx
            .fetcher
            .fetch_page(&url)
            .await
            .with_context(|| format!("Failed to fetch page {} for suburb '{}'", page, suburb))?;
        summary.pages += 1;

        let document = Html::parse_document(&html);
        let cards = ctx.extractor.cards(&document);
        info!(
            "🔍 Found {} listings on page {} for suburb '{}'",
            cards.len(),
            page,
            suburb
        );
        if cards.is_empty() {
            warn!(suburb, page, "No listings on page");
        }
        summary.cards += cards.len();

        for (idx, card) in cards.into_iter().enumerate() {
            let listing = match ctx.extractor.extract(card) {
                Ok(listing) => listing,
                Err(e) => {
                    warn!(suburb, page, card = idx, "❌ Skipping listing: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let days_on_market = ctx.history.days_on_market(&listing.link, ctx.scraped_date);
            let record = ListingRecord::new(listing, suburb, ctx.scraped_date, days_on_market);
            sink.append(&record)?;
            summary.written += 1;
        }

        info!("✅ Page {} scraped for '{}'", page, suburb);
    }

    Ok(summary)
}

/// Scrape every suburb into the CSV at `output`.
///
/// Existing rows in `output` are loaded first to work out days on market,
/// then new rows are appended to the same file.
pub async fn run(
    fetcher: &dyn PageFetcher,
    suburbs: &[String],
    pages: u32,
    output: &Path,
    scraped_date: NaiveDate,
) -> Result<ScrapeSummary> {
    let history = History::load(output)
        .with_context(|| format!("Failed to load existing rows from {}", output.display()))?;
    let mut sink = ListingSink::open_append(output)?;

    let extractor = ListingExtractor::new()?;
    let params = SearchParams::default();
    let ctx = ScrapeContext {
        fetcher,
        extractor: &extractor,
        params: &params,
        history: &history,
        scraped_date,
    };

    info!(
        fetcher = fetcher.name(),
        suburbs = suburbs.len(),
        pages,
        "Starting scrape for {}",
        scraped_date
    );

    let mut total = ScrapeSummary::default();
    for suburb in suburbs {
        let summary = scrape_suburb(&ctx, &mut sink, suburb, pages).await?;
        info!(
            suburb = suburb.as_str(),
            written = summary.written,
            skipped = summary.skipped,
            "Suburb done"
        );
        total += summary;
    }

    info!(
        "Appended {} rows to {}",
        sink.rows_written(),
        output.display()
    );
    sink.close()?;
    Ok(total)
}
