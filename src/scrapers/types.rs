use url::form_urlencoded;

/// Site origin prepended to relative listing links
pub const SITE_ORIGIN: &str = "https://www.realestate.com.au";

/// Search filters applied to every results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Highest asking price included in results
    pub max_price: u64,
    /// State abbreviation appended to the area name
    pub state: String,
    /// Drop listings that are already under contract
    pub exclude_under_contract: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_price: 550_000,
            state: "wa".to_string(),
            exclude_under_contract: true,
        }
    }
}

impl SearchParams {
    /// Results page URL for `area`, pages numbered from 1.
    pub fn page_url(&self, area: &str, page: u32) -> String {
        let area: String = form_urlencoded::byte_serialize(area.to_lowercase().as_bytes()).collect();
        let misc = if self.exclude_under_contract {
            "misc=ex-under-contract&"
        } else {
            ""
        };

        format!(
            "{}/buy/property-house-townhouse-unit+apartment-villa-between-0-{}-in-{},+{}/list-{}?{}source=refinement",
            SITE_ORIGIN, self.max_price, area, self.state, page, misc
        )
    }
}

/// Absolute form of a listing link taken from a card.
pub fn absolute_link(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", SITE_ORIGIN, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_page_url() {
        let url = SearchParams::default().page_url("Mount Lawley", 2);
        assert_eq!(
            url,
            "https://www.realestate.com.au/buy/property-house-townhouse-unit+apartment-villa-between-0-550000-in-mount+lawley,+wa/list-2?misc=ex-under-contract&source=refinement"
        );
    }

    #[test]
    fn escapes_reserved_characters_in_area() {
        let url = SearchParams::default().page_url("O'Connor & Co", 1);
        assert!(url.contains("-in-o%27connor+%26+co,+wa/list-1?"));
    }

    #[test]
    fn under_contract_filter_is_optional() {
        let params = SearchParams {
            exclude_under_contract: false,
            ..SearchParams::default()
        };
        assert!(params.page_url("perth", 1).ends_with("/list-1?source=refinement"));
    }

    #[test]
    fn relative_links_get_the_origin() {
        assert_eq!(
            absolute_link("/property-house-wa-perth-1234"),
            "https://www.realestate.com.au/property-house-wa-perth-1234"
        );
        assert_eq!(
            absolute_link("https://www.realestate.com.au/property-unit-wa-perth-9"),
            "https://www.realestate.com.au/property-unit-wa-perth-9"
        );
    }
}
