//! Current-owner extraction: owner count plus the ownership detail block.
//!
//! The detail block is only emitted when at least one ownership field is
//! positively matched; sparse input yields `None`, never a guessed struct.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::{OwnerType, OwnershipInfo};

use super::numeric::{mileage_in_range, parse_separated_u32};

lazy_static! {
    /// Owner-count layouts ("1-Owner vehicle", "Owners reported: 2").
    static ref OWNER_COUNT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(\d+)\s*-\s*owner\b").unwrap(),
        Regex::new(r"(?i)\bOwners?\s*(?:Reported)?[:\s]+(\d+)\b").unwrap(),
        Regex::new(r"(?i)\b(\d+)\s+(?:previous\s+)?owners?\b").unwrap(),
    ];

    static ref YEAR_PURCHASED_PATTERN: Regex =
        Regex::new(r"(?i)(?:year\s+)?purchased[:\s]*(?:in\s+)?((?:19|20)\d{2})").unwrap();

    static ref OWNER_TYPE_PATTERN: Regex =
        Regex::new(r"(?i)(?:type\s+of\s+owner|owner\s+type|vehicle\s+use)[:\s]+(personal|commercial|rental|lease)")
            .unwrap();

    static ref OWNER_TYPE_PHRASE_PATTERN: Regex =
        Regex::new(r"(?i)\b(personal|commercial|rental|lease[d]?)\s+(?:vehicle|use)\b").unwrap();

    static ref OWNERSHIP_LENGTH_PATTERN: Regex =
        Regex::new(r"(?i)(?:length\s+of\s+ownership|owned\s+for)[:\s]+([\d.]+\s*(?:yrs?\.?|years?|mos?\.?|months?))")
            .unwrap();

    static ref STATES_LINE_PATTERN: Regex =
        Regex::new(r"(?i)owned\s+in\s+the\s+following\s+states(?:/provinces)?[:\s]+([^\r\n]+)").unwrap();

    static ref ANNUAL_MILES_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:estimated\s+)?(?:miles|mileage)\s+(?:driven\s+)?per\s+year[:\s]+([\d,]+)").unwrap(),
        Regex::new(r"(?i)([\d,]+)\s*mi(?:les)?\s*/\s*(?:yr|year)").unwrap(),
    ];

    static ref LAST_ODOMETER_PATTERN: Regex =
        Regex::new(r"(?i)last\s+(?:reported\s+)?odometer(?:\s+reading)?[:\s]+([\d,]+)").unwrap();
}

/// Normalize a state token ("CA", "California") to its two-letter code.
/// Unknown tokens are dropped rather than guessed.
fn state_code(token: &str) -> Option<&'static str> {
    let token = token.trim();
    match token.to_uppercase().as_str() {
        "AL" | "ALABAMA" => Some("AL"),
        "AK" | "ALASKA" => Some("AK"),
        "AZ" | "ARIZONA" => Some("AZ"),
        "AR" | "ARKANSAS" => Some("AR"),
        "CA" | "CALIFORNIA" => Some("CA"),
        "CO" | "COLORADO" => Some("CO"),
        "CT" | "CONNECTICUT" => Some("CT"),
        "DE" | "DELAWARE" => Some("DE"),
        "FL" | "FLORIDA" => Some("FL"),
        "GA" | "GEORGIA" => Some("GA"),
        "HI" | "HAWAII" => Some("HI"),
        "ID" | "IDAHO" => Some("ID"),
        "IL" | "ILLINOIS" => Some("IL"),
        "IN" | "INDIANA" => Some("IN"),
        "IA" | "IOWA" => Some("IA"),
        "KS" | "KANSAS" => Some("KS"),
        "KY" | "KENTUCKY" => Some("KY"),
        "LA" | "LOUISIANA" => Some("LA"),
        "ME" | "MAINE" => Some("ME"),
        "MD" | "MARYLAND" => Some("MD"),
        "MA" | "MASSACHUSETTS" => Some("MA"),
        "MI" | "MICHIGAN" => Some("MI"),
        "MN" | "MINNESOTA" => Some("MN"),
        "MS" | "MISSISSIPPI" => Some("MS"),
        "MO" | "MISSOURI" => Some("MO"),
        "MT" | "MONTANA" => Some("MT"),
        "NE" | "NEBRASKA" => Some("NE"),
        "NV" | "NEVADA" => Some("NV"),
        "NH" | "NEW HAMPSHIRE" => Some("NH"),
        "NJ" | "NEW JERSEY" => Some("NJ"),
        "NM" | "NEW MEXICO" => Some("NM"),
        "NY" | "NEW YORK" => Some("NY"),
        "NC" | "NORTH CAROLINA" => Some("NC"),
        "ND" | "NORTH DAKOTA" => Some("ND"),
        "OH" | "OHIO" => Some("OH"),
        "OK" | "OKLAHOMA" => Some("OK"),
        "OR" | "OREGON" => Some("OR"),
        "PA" | "PENNSYLVANIA" => Some("PA"),
        "RI" | "RHODE ISLAND" => Some("RI"),
        "SC" | "SOUTH CAROLINA" => Some("SC"),
        "SD" | "SOUTH DAKOTA" => Some("SD"),
        "TN" | "TENNESSEE" => Some("TN"),
        "TX" | "TEXAS" => Some("TX"),
        "UT" | "UTAH" => Some("UT"),
        "VT" | "VERMONT" => Some("VT"),
        "VA" | "VIRGINIA" => Some("VA"),
        "WA" | "WASHINGTON" => Some("WA"),
        "WV" | "WEST VIRGINIA" => Some("WV"),
        "WI" | "WISCONSIN" => Some("WI"),
        "WY" | "WYOMING" => Some("WY"),
        "DC" | "DISTRICT OF COLUMBIA" => Some("DC"),
        _ => None,
    }
}

fn owner_type_from(s: &str) -> Option<OwnerType> {
    match s.to_lowercase().as_str() {
        "personal" => Some(OwnerType::Personal),
        "commercial" => Some(OwnerType::Commercial),
        "rental" => Some(OwnerType::Rental),
        "lease" | "leased" => Some(OwnerType::Lease),
        _ => None,
    }
}

fn extract_states(text: &str) -> Vec<String> {
    let mut states = Vec::new();
    if let Some(caps) = STATES_LINE_PATTERN.captures(text) {
        for token in caps[1].split([',', ';']) {
            if let Some(code) = state_code(token) {
                let code = code.to_string();
                if !states.contains(&code) {
                    states.push(code);
                }
            }
        }
    }
    states
}

/// Extract the owner count and the ownership detail block.
pub fn extract_ownership(text: &str) -> (Option<u32>, Option<OwnershipInfo>) {
    let owners = OWNER_COUNT_PATTERNS
        .iter()
        .find_map(|p| p.captures(text))
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|n| *n > 0);

    let mut info = OwnershipInfo::default();
    let mut matched = false;

    if let Some(caps) = YEAR_PURCHASED_PATTERN.captures(text) {
        info.year_purchased = caps[1].parse::<u16>().ok();
        matched |= info.year_purchased.is_some();
    }

    info.owner_type = OWNER_TYPE_PATTERN
        .captures(text)
        .and_then(|c| owner_type_from(&c[1]))
        .or_else(|| {
            OWNER_TYPE_PHRASE_PATTERN
                .captures(text)
                .and_then(|c| owner_type_from(&c[1]))
        });
    matched |= info.owner_type.is_some();

    if let Some(caps) = OWNERSHIP_LENGTH_PATTERN.captures(text) {
        info.length_of_ownership = Some(caps[1].trim().to_string());
        matched = true;
    }

    info.states = extract_states(text);
    matched |= !info.states.is_empty();

    info.annual_miles = ANNUAL_MILES_PATTERNS
        .iter()
        .find_map(|p| p.captures(text))
        .and_then(|c| parse_separated_u32(&c[1]))
        .filter(|m| *m > 0 && *m < 100_000);
    matched |= info.annual_miles.is_some();

    info.last_odometer = LAST_ODOMETER_PATTERN
        .captures(text)
        .and_then(|c| parse_separated_u32(&c[1]))
        .filter(|m| mileage_in_range(*m));
    matched |= info.last_odometer.is_some();

    (owners, if matched { Some(info) } else { None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_count_layouts() {
        assert_eq!(extract_ownership("1-Owner vehicle").0, Some(1));
        assert_eq!(extract_ownership("Owners reported: 2").0, Some(2));
        assert_eq!(extract_ownership("3 previous owners").0, Some(3));
        assert_eq!(extract_ownership("no owner data").0, None);
    }

    #[test]
    fn test_full_ownership_block() {
        let text = "Owner 1\nYear purchased: 2019\nType of owner: Personal\n\
                    Length of ownership: 4.2 yrs.\n\
                    Owned in the following states/provinces: California, Nevada\n\
                    Estimated miles driven per year: 12,500\n\
                    Last reported odometer reading: 52,340";
        let (owners, info) = extract_ownership(text);
        assert_eq!(owners, Some(1));
        let info = info.unwrap();
        assert_eq!(info.owner_number, 1);
        assert_eq!(info.year_purchased, Some(2019));
        assert_eq!(info.owner_type, Some(OwnerType::Personal));
        assert_eq!(info.length_of_ownership.as_deref(), Some("4.2 yrs."));
        assert_eq!(info.states, vec!["CA", "NV"]);
        assert_eq!(info.annual_miles, Some(12500));
        assert_eq!(info.last_odometer, Some(52340));
    }

    #[test]
    fn test_owner_type_phrase_fallback() {
        let (_, info) = extract_ownership("Driven as a personal vehicle since new");
        assert_eq!(info.unwrap().owner_type, Some(OwnerType::Personal));
    }

    #[test]
    fn test_state_codes_pass_through() {
        let (_, info) =
            extract_ownership("Owned in the following states: TX, AZ, TX");
        assert_eq!(info.unwrap().states, vec!["TX", "AZ"]);
    }

    #[test]
    fn test_sparse_text_yields_none() {
        let (owners, info) = extract_ownership("oil change performed");
        assert_eq!(owners, None);
        assert!(info.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_odometer() {
        let (_, info) = extract_ownership("Last reported odometer reading: 999,999");
        assert!(info.is_none());
    }
}
