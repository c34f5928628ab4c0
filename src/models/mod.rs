use chrono::NaiveDate;
use serde::Serialize;

/// Column header of the output file, in row order.
pub const HEADER: [&str; 11] = [
    "Address",
    "Link",
    "Bedrooms",
    "Bathrooms",
    "Parking",
    "Area",
    "Type",
    "Suburb",
    "Scraped Date",
    "Days on Market",
    "Asking Price",
];

/// Fields read off a single listing card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedListing {
    pub address: String,
    pub link: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    pub area: u32,
    pub property_type: String,
    pub asking_price: u64,
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: u32,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: u32,
    #[serde(rename = "Parking")]
    pub parking: u32,
    #[serde(rename = "Area")]
    pub area: u32,
    #[serde(rename = "Type")]
    pub property_type: String,
    #[serde(rename = "Suburb")]
    pub suburb: String,
    /// Serialized as `YYYY-MM-DD`
    #[serde(rename = "Scraped Date")]
    pub scraped_date: NaiveDate,
    /// Empty when the listing is new or its first-seen date is unreadable
    #[serde(rename = "Days on Market")]
    pub days_on_market: Option<i64>,
    #[serde(rename = "Asking Price")]
    pub asking_price: u64,
}

impl ListingRecord {
    pub fn new(
        listing: ExtractedListing,
        suburb: &str,
        scraped_date: NaiveDate,
        days_on_market: Option<i64>,
    ) -> Self {
        Self {
            address: listing.address,
            link: listing.link,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            parking: listing.parking,
            area: listing.area,
            property_type: listing.property_type,
            suburb: suburb.to_string(),
            scraped_date,
            days_on_market,
            asking_price: listing.asking_price,
        }
    }
}
