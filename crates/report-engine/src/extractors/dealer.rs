//! Dealer-block and location extraction.
//!
//! The dealer block is a fixed four-line structure inside a service span:
//! business name, "City, ST" line, phone line, "x.y/5.0" rating line, with
//! an optional trailing review count. Anything less than the full match
//! yields no dealer info at all; partial objects are never emitted.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::DealerInfo;

lazy_static! {
    /// Business-name line: must end with a recognizable business-type token.
    static ref NAME_LINE: Regex = Regex::new(concat!(
        r"^[A-Z][A-Za-z0-9 .,&'-]*\b(?:Toyota|Honda|Ford|Chevrolet|Nissan|Subaru|Hyundai|Kia|",
        r"Auto|Automotive|Motors|Service|Center|Repair|Tire|Lube|Dealer|Dealership|Garage|Inc|LLC)\.?$"
    ))
    .unwrap();

    static ref LOCATION_LINE: Regex =
        Regex::new(r"^([A-Z][A-Za-z .'-]+,\s*[A-Z]{2})$").unwrap();

    static ref PHONE_LINE: Regex =
        Regex::new(r"^(?:Phone[:\s]*)?(\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4})$").unwrap();

    static ref RATING_LINE: Regex =
        Regex::new(r"^([0-5](?:\.\d)?)\s*/\s*5(?:\.0)?$").unwrap();

    static ref REVIEWS_LINE: Regex =
        Regex::new(r"(?i)^([\d,]+)\s+(?:verified\s+)?reviews?$").unwrap();

    // ------------------------------------------------------------------
    // Free-text location fallback (for the record's location field, not
    // the dealer block): named shops, "City, ST", generic business names.
    // ------------------------------------------------------------------
    static ref LOCATION_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?:at|@|by)\s+([A-Z][A-Za-z\s&']+(?:Toyota|Honda|Ford|Chevrolet|Nissan|Auto|Service|Repair|Tire|Lube)[A-Za-z\s&']*)"
        )
        .unwrap(),
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2})").unwrap(),
        Regex::new(r"(?:at|@|by)\s+([A-Z][A-Za-z\s&']+(?:Inc|LLC|Ltd|Corp|Center|Shop|Garage)\.?)")
            .unwrap(),
    ];

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Attempt the four-line structural dealer match within a span.
pub fn extract_dealer(span: &str) -> Option<DealerInfo> {
    let lines: Vec<&str> = span
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    for (i, line) in lines.iter().enumerate() {
        if !NAME_LINE.is_match(line) {
            continue;
        }
        let (Some(loc), Some(phone), Some(rating)) = (
            lines.get(i + 1).and_then(|l| LOCATION_LINE.captures(l)),
            lines.get(i + 2).and_then(|l| PHONE_LINE.captures(l)),
            lines.get(i + 3).and_then(|l| RATING_LINE.captures(l)),
        ) else {
            continue;
        };

        let rating_value = rating[1].parse::<f32>().ok().filter(|r| (0.0..=5.0).contains(r));
        let review_count = lines
            .get(i + 4)
            .and_then(|l| REVIEWS_LINE.captures(l))
            .and_then(|c| c[1].replace(',', "").parse::<u32>().ok());

        return Some(DealerInfo {
            name: line.to_string(),
            location: Some(loc[1].to_string()),
            phone: Some(phone[1].to_string()),
            rating: rating_value,
            review_count,
        });
    }

    None
}

/// Extract a service location from collapsed description text.
pub fn extract_location(text: &str) -> Option<String> {
    for pattern in LOCATION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let location = WHITESPACE_RUN
                .replace_all(caps[1].trim(), " ")
                .to_string();
            if location.len() > 5 {
                let truncated: String = location.chars().take(200).collect();
                return Some(truncated);
            }
        }
    }
    None
}
