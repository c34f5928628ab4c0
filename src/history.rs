use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

const LINK_COLUMN: &str = "Link";
const SCRAPED_DATE_COLUMN: &str = "Scraped Date";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("existing output has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("failed to read existing output: {0}")]
    Io(#[from] io::Error),

    #[error("malformed existing output: {0}")]
    Csv(#[from] csv::Error),
}

/// Earlier sighting of a listing, as stored in the output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorSighting {
    /// Raw `Scraped Date` cell; parsed only when days on market is computed
    pub scraped_date: String,
}

/// Previously written rows, keyed by listing link.
///
/// Rows are scanned top to bottom and a later row replaces an earlier one with
/// the same link, so the surviving entry is the last one in file order.
#[derive(Debug, Default)]
pub struct History {
    by_link: HashMap<String, PriorSighting>,
}

impl History {
    /// Load the output file at `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        match File::open(path) {
            Ok(file) => {
                let history = Self::from_reader(file)?;
                if history.is_empty() {
                    info!("{} has no earlier rows", path.display());
                    return Ok(history);
                }
                info!(
                    "📚 Loaded {} known listings from {}",
                    history.len(),
                    path.display()
                );
                Ok(history)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No existing output at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read history from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HistoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        // An empty file has no header row at all
        if headers.is_empty() {
            return Ok(Self::default());
        }

        let link_idx = column_index(&headers, LINK_COLUMN)?;
        let date_idx = column_index(&headers, SCRAPED_DATE_COLUMN)?;

        let mut by_link = HashMap::new();
        for (row, result) in csv_reader.records().enumerate() {
            let record = result?;
            let (Some(link), Some(date)) = (record.get(link_idx), record.get(date_idx)) else {
                warn!(row = row + 1, "Skipping short history row");
                continue;
            };

            by_link.insert(
                link.to_string(),
                PriorSighting {
                    scraped_date: date.to_string(),
                },
            );
        }

        Ok(Self { by_link })
    }

    pub fn len(&self) -> usize {
        self.by_link.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_link.is_empty()
    }

    /// Days between the recorded sighting of `link` and `today`.
    ///
    /// `None` when the link is unknown or its recorded date is not `YYYY-MM-DD`.
    /// A recorded date after `today` gives a negative count.
    pub fn days_on_market(&self, link: &str, today: NaiveDate) -> Option<i64> {
        let sighting = self.by_link.get(link)?;
        match NaiveDate::parse_from_str(&sighting.scraped_date, "%Y-%m-%d") {
            Ok(first_seen) => Some((today - first_seen).num_days()),
            Err(e) => {
                debug!(
                    link,
                    date = %sighting.scraped_date,
                    error = %e,
                    "Unreadable first-seen date"
                );
                None
            }
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, HistoryError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(HistoryError::MissingColumn(name))
}
