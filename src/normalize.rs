//! Conversions from raw card text into typed values.

/// Property categories, in match priority order.
const PROPERTY_TYPES: [(&str, &str); 7] = [
    ("house", "House"),
    ("apartment", "Apartment"),
    ("unit", "Unit"),
    ("townhouse", "Townhouse"),
    ("villa", "Villa"),
    ("duplex", "Duplex"),
    ("studio", "Studio"),
];

/// First run of ASCII digits in `text`, if it fits in a `u64`.
pub fn try_extract_number(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// First run of digits in `text`, or 0 when there is none.
pub fn extract_number(text: &str) -> u64 {
    try_extract_number(text).unwrap_or(0)
}

/// Same as [`extract_number`], narrowed for count and size fields.
pub fn extract_count(text: &str) -> u32 {
    u32::try_from(extract_number(text)).unwrap_or(0)
}

/// Every digit in `text` joined into one number, e.g. "$529,000" -> 529000.
///
/// Returns `None` when no digit is present or the result overflows.
pub fn try_parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Map a free-text property type onto a canonical category.
///
/// Matching is a case-insensitive substring test against the category list in
/// its fixed order, so "Townhouse" and "Penthouse" both land on "House".
/// Unmatched input is trimmed and title-cased.
pub fn normalize_type(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    PROPERTY_TYPES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| title_case(raw.trim()))
}

/// Upper-case the first letter of every word and lower-case the rest.
/// Any non-alphabetic character starts a new word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
