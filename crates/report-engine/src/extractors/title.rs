//! Title-history extraction.
//!
//! Issue flags follow the clear-phrase-absence rule: an issue is presumed
//! present until the report's canonical clearing phrase says otherwise.
//! Absence of evidence is treated as presence of risk, not as unknown.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::TitleInfo;

use crate::patterns::{
    contains_any, issue_unless_cleared, AIRBAG_CLEAR_PHRASES, DAMAGE_BRANDS_CLEAR_PHRASES,
    ODOMETER_BRANDS_CLEAR_PHRASES, ODOMETER_ROLLBACK_CLEAR_PHRASES, RECALL_CLEAR_PHRASES,
    STRUCTURAL_DAMAGE_CLEAR_PHRASES, TOTAL_LOSS_CLEAR_PHRASES,
};

/// Markers proving the document actually carries a title-history section.
/// Without one of these the extractor yields nothing, so empty input never
/// fabricates an all-issues-present record.
const SECTION_MARKERS: &[&str] = &[
    "title history",
    "title check",
    "damage brand",
    "odometer brand",
    "total loss",
    "structural damage",
    "airbag",
    "odometer rollback",
    "accident",
    "open recall",
];

lazy_static! {
    static ref ACCIDENT_COUNT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(\d+)\s+(?:accidents?|damage\s+reports?)").unwrap(),
        Regex::new(r"(?i)accidents?\s*(?:reported)?[:\s]+(\d+)").unwrap(),
    ];
    static ref NO_ACCIDENTS_PATTERN: Regex =
        Regex::new(r"(?i)no\s+(?:accidents?(?:\s+or\s+damage)?|damage)\s+(?:reported|found)")
            .unwrap();
}

fn extract_accident_count(text: &str) -> u32 {
    // An explicit "no accidents" phrase overrides any numeric match
    if NO_ACCIDENTS_PATTERN.is_match(text) {
        return 0;
    }
    ACCIDENT_COUNT_PATTERNS
        .iter()
        .find_map(|p| p.captures(text))
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0)
}

pub fn extract_title_info(text: &str) -> Option<TitleInfo> {
    let lower = text.to_lowercase();
    if !contains_any(&lower, SECTION_MARKERS) {
        return None;
    }

    Some(TitleInfo {
        damage_brands_clear: contains_any(&lower, DAMAGE_BRANDS_CLEAR_PHRASES),
        odometer_brands_clear: contains_any(&lower, ODOMETER_BRANDS_CLEAR_PHRASES),
        total_loss: issue_unless_cleared(&lower, TOTAL_LOSS_CLEAR_PHRASES),
        structural_damage: issue_unless_cleared(&lower, STRUCTURAL_DAMAGE_CLEAR_PHRASES),
        airbag_deployed: issue_unless_cleared(&lower, AIRBAG_CLEAR_PHRASES),
        odometer_rollback: issue_unless_cleared(&lower, ODOMETER_ROLLBACK_CLEAR_PHRASES),
        accidents_reported: extract_accident_count(&lower),
        recalls_reported: issue_unless_cleared(&lower, RECALL_CLEAR_PHRASES),
    })
}
