//! Shared phrase inventories and text helpers for the extraction pipeline.
//!
//! Every list here is declarative data: ordered slices of phrases consulted
//! by the extractors. Keeping them out of the control flow keeps the rule
//! sets independently testable and extensible.

/// Phrases that mark the end of the service-history section. Anything past
/// the first occurrence is footer material, never a service event.
pub const SECTION_TERMINATORS: &[&str] = &["glossary", "have questions"];

/// Leading span text matching any of these is document metadata (title and
/// registration filings, liens, color changes, manufacture/sale events),
/// not a service event.
pub const BOILERPLATE_PREFIXES: &[&str] = &[
    "title issued",
    "title or registration issued",
    "registration issued",
    "registration renewed",
    "registration updated",
    "lien reported",
    "loan or lien",
    "vehicle color",
    "vehicle manufactured",
    "vehicle offered for sale",
    "vehicle sold",
    "vehicle purchase reported",
];

// ----------------------------------------------------------------------------
// Clearing phrases for the title-history section.
//
// Absence of the phrase means the issue is treated as present. This
// inversion is deliberate: a report that says nothing about total loss is
// treated as carrying the risk, not as unknown.
// ----------------------------------------------------------------------------

pub const DAMAGE_BRANDS_CLEAR_PHRASES: &[&str] =
    &["no damage brands reported", "no damage brand reported"];

pub const ODOMETER_BRANDS_CLEAR_PHRASES: &[&str] =
    &["no odometer brands reported", "no odometer brand reported"];

pub const TOTAL_LOSS_CLEAR_PHRASES: &[&str] =
    &["no total loss reported", "no total loss record"];

pub const STRUCTURAL_DAMAGE_CLEAR_PHRASES: &[&str] = &[
    "no structural damage reported",
    "no structural/frame damage reported",
];

pub const AIRBAG_CLEAR_PHRASES: &[&str] = &[
    "no airbag deployment reported",
    "no airbag deployments reported",
];

pub const ODOMETER_ROLLBACK_CLEAR_PHRASES: &[&str] = &[
    "no indication of an odometer rollback",
    "no odometer rollback reported",
];

pub const RECALL_CLEAR_PHRASES: &[&str] = &["no open recalls", "no open safety recalls"];

// ----------------------------------------------------------------------------
// Clearing phrases for the warranty-check section. Same convention: the
// expired flag flips to false only when the coverage is positively active.
// ----------------------------------------------------------------------------

pub const BASIC_WARRANTY_ACTIVE_PHRASES: &[&str] =
    &["basic warranty active", "basic coverage active", "under basic warranty"];

pub const DRIVETRAIN_WARRANTY_ACTIVE_PHRASES: &[&str] = &[
    "drivetrain warranty active",
    "drivetrain coverage active",
    "powertrain warranty active",
    "powertrain coverage active",
];

pub const RUST_WARRANTY_ACTIVE_PHRASES: &[&str] = &[
    "rust warranty active",
    "rust coverage active",
    "corrosion warranty active",
    "corrosion coverage active",
];

pub const ROADSIDE_ACTIVE_PHRASES: &[&str] = &[
    "roadside assistance active",
    "roadside coverage active",
    "roadside warranty active",
];

// ----------------------------------------------------------------------------
// Coarse classification fallback keywords (lowest-priority tier).
// ----------------------------------------------------------------------------

pub const REPAIR_FALLBACK_KEYWORDS: &[&str] = &["replace", "repair", "fix", "broken"];

pub const INSPECTION_FALLBACK_KEYWORDS: &[&str] = &["inspect", "check", "test"];

/// Check whether lowercased `text` contains any phrase from the group.
pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// Clear-phrase-absence rule: true (issue present) unless a clearing phrase
/// is found in the lowercased text.
pub fn issue_unless_cleared(text_lower: &str, clearing: &[&str]) -> bool {
    !contains_any(text_lower, clearing)
}
