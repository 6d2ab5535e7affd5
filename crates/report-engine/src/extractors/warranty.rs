//! Warranty-check and Certified Pre-Owned extraction.
//!
//! Warranty flags use the same absence-implies-expired convention as the
//! title extractor: coverage counts as active only when the report says so.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::{CpoInfo, WarrantyInfo};

use crate::patterns::{
    contains_any, issue_unless_cleared, BASIC_WARRANTY_ACTIVE_PHRASES,
    DRIVETRAIN_WARRANTY_ACTIVE_PHRASES, ROADSIDE_ACTIVE_PHRASES, RUST_WARRANTY_ACTIVE_PHRASES,
};

const WARRANTY_SECTION_MARKERS: &[&str] = &["warranty", "coverage"];

lazy_static! {
    static ref CPO_MARKER_PATTERN: Regex =
        Regex::new(r"(?i)certified\s+pre-?owned|\bCPO\b").unwrap();

    static ref CPO_TIER_PATTERN: Regex =
        Regex::new(r"(?i)\b(gold|silver|platinum|elite|premium)\s+certified\b").unwrap();

    /// "7-year/100,000-mile" style warranty terms.
    static ref CPO_TERMS_PATTERN: Regex =
        Regex::new(r"(?i)\b(\d{1,2})\s*-?\s*(?:year|yr)s?\s*/\s*([\d,]+)\s*-?\s*miles?\b").unwrap();

    static ref INSPECTION_POINTS_PATTERN: Regex =
        Regex::new(r"(?i)\b(\d{2,3})\s*-?\s*point\s+inspection\b").unwrap();
}

pub fn extract_warranty_info(text: &str) -> Option<WarrantyInfo> {
    let lower = text.to_lowercase();
    if !contains_any(&lower, WARRANTY_SECTION_MARKERS) {
        return None;
    }

    Some(WarrantyInfo {
        basic_expired: issue_unless_cleared(&lower, BASIC_WARRANTY_ACTIVE_PHRASES),
        drivetrain_expired: issue_unless_cleared(&lower, DRIVETRAIN_WARRANTY_ACTIVE_PHRASES),
        rust_expired: issue_unless_cleared(&lower, RUST_WARRANTY_ACTIVE_PHRASES),
        roadside_expired: issue_unless_cleared(&lower, ROADSIDE_ACTIVE_PHRASES),
    })
}

pub fn extract_cpo_info(text: &str) -> Option<CpoInfo> {
    if !CPO_MARKER_PATTERN.is_match(text) {
        return None;
    }

    let tier = CPO_TIER_PATTERN.captures(text).map(|c| {
        let mut t = c[1].to_lowercase();
        // Capitalize for display ("Gold", "Platinum")
        if let Some(first) = t.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        t
    });

    let warranty_terms = CPO_TERMS_PATTERN
        .captures(text)
        .map(|c| format!("{}-year/{}-mile", &c[1], c[2].replace(',', "")));

    let inspection_points = INSPECTION_POINTS_PATTERN
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok());

    Some(CpoInfo {
        certified: true,
        tier,
        warranty_terms,
        inspection_points,
    })
}
