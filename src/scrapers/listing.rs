use crate::models::ExtractedListing;
use crate::normalize::{extract_count, normalize_type, try_parse_price};
use crate::scrapers::types::absolute_link;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

const CARD: &str = ".residential-card__content-wrapper";
const ADDRESS: &str = ".residential-card__address-heading";
const ADDRESS_LINK: &str = "a";
const PRICE: &str = ".residential-card__price";
const FEATURES: &str = "ul.residential-card__primary li";
const PROPERTY_TYPE: &str = "ul.residential-card__primary p";

/// Why a card produced no listing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("card has no address heading")]
    MissingAddress,

    #[error("address heading has no link")]
    MissingLink,
}

/// Compiled selectors for realestate.com.au result cards
pub struct ListingExtractor {
    card: Selector,
    address: Selector,
    address_link: Selector,
    price: Selector,
    features: Selector,
    property_type: Selector,
}

impl ListingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            card: selector(CARD)?,
            address: selector(ADDRESS)?,
            address_link: selector(ADDRESS_LINK)?,
            price: selector(PRICE)?,
            features: selector(FEATURES)?,
            property_type: selector(PROPERTY_TYPE)?,
        })
    }

    /// All listing cards on a results page
    pub fn cards<'a>(&'a self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.card).collect()
    }

    /// Read one card. Only the address and its link are required; every other
    /// field falls back to 0 or an empty string.
    pub fn extract(&self, card: ElementRef<'_>) -> Result<ExtractedListing, ExtractError> {
        let address_el = card
            .select(&self.address)
            .next()
            .ok_or(ExtractError::MissingAddress)?;
        let address = element_text(address_el);

        let href = address_el
            .select(&self.address_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ExtractError::MissingLink)?;
        let link = absolute_link(href);

        let asking_price = self.try_price(card).unwrap_or(0);
        let features = self.features(card);
        let property_type = self.try_property_type(card).unwrap_or_default();

        Ok(ExtractedListing {
            address,
            link,
            bedrooms: features.bedrooms,
            bathrooms: features.bathrooms,
            parking: features.parking,
            area: features.area,
            property_type,
            asking_price,
        })
    }

    fn try_price(&self, card: ElementRef<'_>) -> Option<u64> {
        let price_el = card.select(&self.price).next()?;
        let price_text = element_text(price_el);
        let price = try_parse_price(&price_text);
        if price.is_none() {
            debug!("No numeric price in '{}'", price_text);
        }
        price
    }

    fn features(&self, card: ElementRef<'_>) -> Features {
        let mut features = Features::default();

        for entry in card.select(&self.features) {
            let Some(label) = entry.value().attr("aria-label") else {
                continue;
            };
            let label = label.to_lowercase();

            if label.contains("bedroom") {
                features.bedrooms = extract_count(&label);
            } else if label.contains("bathroom") {
                features.bathrooms = extract_count(&label);
            } else if label.contains("car space") {
                features.parking = extract_count(&label);
            } else if label.contains("m²") || label.contains("building size") {
                features.area = extract_count(&label);
            }
        }

        features
    }

    fn try_property_type(&self, card: ElementRef<'_>) -> Option<String> {
        let type_el = card.select(&self.property_type).next()?;
        Some(normalize_type(&element_text(type_el)))
    }
}

#[derive(Debug, Default)]
struct Features {
    bedrooms: u32,
    bathrooms: u32,
    parking: u32,
    area: u32,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{}': {}", css, e))
}

/// Visible text of an element with whitespace runs collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CARD: &str = r#"
        <div class="residential-card__content-wrapper">
          <span class="residential-card__price">$529,000</span>
          <h2 class="residential-card__address-heading">
            <a href="/property-house-wa-morley-143210000"><span>12 Smith Street, Morley</span></a>
          </h2>
          <ul class="residential-card__primary">
            <p>House</p>
            <li aria-label="3 bedrooms"></li>
            <li aria-label="2 bathrooms"></li>
            <li aria-label="1 car space"></li>
            <li aria-label="450m² land size"></li>
          </ul>
        </div>"#;

    fn extract_all(html: &str) -> Vec<Result<ExtractedListing, ExtractError>> {
        let extractor = ListingExtractor::new().unwrap();
        let document = Html::parse_document(html);
        extractor
            .cards(&document)
            .into_iter()
            .map(|card| extractor.extract(card))
            .collect()
    }

    #[test]
    fn extracts_complete_card() {
        let results = extract_all(FULL_CARD);
        assert_eq!(results.len(), 1);

        let listing = results[0].as_ref().unwrap();
        assert_eq!(listing.address, "12 Smith Street, Morley");
        assert_eq!(
            listing.link,
            "https://www.realestate.com.au/property-house-wa-morley-143210000"
        );
        assert_eq!(listing.bedrooms, 3);
        assert_eq!(listing.bathrooms, 2);
        assert_eq!(listing.parking, 1);
        assert_eq!(listing.area, 450);
        assert_eq!(listing.property_type, "House");
        assert_eq!(listing.asking_price, 529_000);
    }

    #[test]
    fn non_numeric_price_is_zero() {
        let html = FULL_CARD.replace("$529,000", "Contact Agent");
        let listing = extract_all(&html).remove(0).unwrap();

        assert_eq!(listing.asking_price, 0);
        assert_eq!(listing.bedrooms, 3);
        assert_eq!(listing.property_type, "House");
        assert_eq!(listing.address, "12 Smith Street, Morley");
    }

    #[test]
    fn missing_optional_parts_default() {
        let html = r#"
            <div class="residential-card__content-wrapper">
              <h2 class="residential-card__address-heading">
                <a href="/property-unit-wa-perth-1">5/10 Hay Street, Perth</a>
              </h2>
            </div>"#;
        let listing = extract_all(html).remove(0).unwrap();

        assert_eq!(listing.address, "5/10 Hay Street, Perth");
        assert_eq!(listing.asking_price, 0);
        assert_eq!(listing.bedrooms, 0);
        assert_eq!(listing.bathrooms, 0);
        assert_eq!(listing.parking, 0);
        assert_eq!(listing.area, 0);
        assert_eq!(listing.property_type, "");
    }

    #[test]
    fn building_size_label_sets_area() {
        let html = r#"
            <div class="residential-card__content-wrapper">
              <h2 class="residential-card__address-heading"><a href="/p/2">2 Oak Rd</a></h2>
              <ul class="residential-card__primary">
                <p>Acreage / semi-rural</p>
                <li aria-label="Building size: 180 square metres"></li>
                <li>no label</li>
              </ul>
            </div>"#;
        let listing = extract_all(html).remove(0).unwrap();

        assert_eq!(listing.area, 180);
        assert_eq!(listing.property_type, "Acreage / Semi-Rural");
    }

    #[test]
    fn missing_address_or_link_fails_the_card() {
        let html = r#"
            <div class="residential-card__content-wrapper">
              <span class="residential-card__price">$400,000</span>
            </div>
            <div class="residential-card__content-wrapper">
              <h2 class="residential-card__address-heading">1 Nowhere Lane</h2>
            </div>
            <div class="residential-card__content-wrapper">
              <h2 class="residential-card__address-heading"><a>3 Anchor St</a></h2>
            </div>"#;
        let results = extract_all(html);

        assert_eq!(
            results,
            vec![
                Err(ExtractError::MissingAddress),
                Err(ExtractError::MissingLink),
                Err(ExtractError::MissingLink),
            ]
        );
    }
}
