// Numeric extraction utilities shared across the pipeline.
use lazy_static::lazy_static;
use regex::Regex;

/// Mileage sanity bounds. Values outside (0, 500000) are false positives
/// (phone numbers, zip codes, dollar amounts) and are never emitted.
pub const MAX_MILEAGE: u32 = 500_000;

lazy_static! {
    /// Ordered fallback patterns for odometer readings embedded in free
    /// text. Earlier patterns are the more reliable layouts.
    static ref MILEAGE_PATTERNS: Vec<Regex> = vec![
        // 45,000 miles / 45000 mi.
        Regex::new(r"(?i)(\d{1,3},?\d{3})\s*(?:miles?|mi\.?)").unwrap(),
        // Standalone 4-6 digit number
        Regex::new(r"(?:^|\s)(\d{4,6})(?:\s|$)").unwrap(),
        // Comma-separated number
        Regex::new(r"(\d{1,3},\d{3})").unwrap(),
    ];
}

/// Parse a number that may carry thousands separators.
pub fn parse_separated_u32(s: &str) -> Option<u32> {
    s.replace(',', "").parse::<u32>().ok()
}

pub fn mileage_in_range(mileage: u32) -> bool {
    mileage > 0 && mileage < MAX_MILEAGE
}

/// Extract an odometer reading from text. Each pattern is tried once; a
/// candidate that fails the range check is discarded, not an error.
pub fn extract_mileage(text: &str) -> Option<u32> {
    for pattern in MILEAGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(mileage) = caps.get(1).and_then(|m| parse_separated_u32(m.as_str())) {
                if mileage_in_range(mileage) {
                    return Some(mileage);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_mileage_formats() {
        assert_eq!(extract_mileage("45,230 miles"), Some(45230));
        assert_eq!(extract_mileage("serviced at 45230 mi."), Some(45230));
        assert_eq!(extract_mileage("odometer read 98,401"), Some(98401));
    }

    #[test]
    fn test_rejects_out_of_range_candidates() {
        // Looks like mileage but exceeds the sanity bound
        assert_eq!(extract_mileage("850,000 miles"), None);
        assert_eq!(extract_mileage("no numbers here"), None);
    }

    #[test]
    fn test_ignores_phone_numbers() {
        // Ten-digit phone number never matches a mileage layout
        assert_eq!(extract_mileage("call 5551234567 today"), None);
    }

    #[test]
    fn test_parse_separated() {
        assert_eq!(parse_separated_u32("45,230"), Some(45230));
        assert_eq!(parse_separated_u32("45230"), Some(45230));
        assert_eq!(parse_separated_u32("n/a"), None);
    }
}
