//! Record segmentation: split the report text into date-anchored spans,
//! one per candidate service event.
//!
//! Two anchor layouts coexist in the wild: a generic "date, optional
//! mileage" header and an explicit "date Odometer: mileage" header.
//! Both variants run over the whole text and their anchors are merged;
//! different sections of the same report use different layouts.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::patterns::{contains_any, BOILERPLATE_PREFIXES, SECTION_TERMINATORS};

/// One date-anchored slice of report text, hypothesized to describe a
/// single service event.
#[derive(Debug, Clone)]
pub struct RawSpan {
    pub date: String,
    /// Mileage exactly as it appeared in the header, separators included.
    pub mileage_raw: Option<String>,
    pub body: String,
}

lazy_static! {
    /// Generic layout: date, then an optional mileage figure on the same or
    /// the next line, optionally suffixed with "miles".
    static ref GENERIC_ANCHOR: Regex = Regex::new(
        r"(?i)(\d{1,2}/\d{1,2}/\d{4})[ \t]*\n?[ \t]*(\d{1,3}(?:,\d{3})+|\d{4,6})?[ \t]*(?:miles?|mi\.?)?"
    )
    .unwrap();

    /// Layout with an explicit odometer label before the mileage.
    static ref ODOMETER_ANCHOR: Regex = Regex::new(
        r"(?i)(\d{1,2}/\d{1,2}/\d{4})\s+Odometer[:\s]+(\d{1,3}(?:,\d{3})+|\d{1,6})"
    )
    .unwrap();

    /// Terminal markers compiled from the declarative list; matching on the
    /// original text keeps byte offsets valid.
    static ref TERMINATOR_PATTERN: Regex = {
        let alternation = SECTION_TERMINATORS
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i){alternation}")).unwrap()
    };
}

#[derive(Debug)]
struct Anchor {
    start: usize,
    header_end: usize,
    date: String,
    mileage_raw: Option<String>,
}

fn collect_anchors(pattern: &Regex, text: &str, out: &mut Vec<Anchor>) {
    for caps in pattern.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        out.push(Anchor {
            start: whole.start(),
            header_end: whole.end(),
            date: caps[1].to_string(),
            mileage_raw: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
}

/// Byte offset of the first terminal section marker, if any. Everything at
/// or past this point is footer material.
fn terminal_cutoff(text: &str) -> usize {
    TERMINATOR_PATTERN
        .find(text)
        .map(|m| m.start())
        .unwrap_or(text.len())
}

/// Split the text into date-anchored spans, merging both anchor variants,
/// dropping boilerplate spans, and deduplicating on the
/// (date, normalized mileage string) key in first-seen order.
pub fn segment_records(text: &str) -> Vec<RawSpan> {
    let mut anchors = Vec::new();
    collect_anchors(&GENERIC_ANCHOR, text, &mut anchors);
    collect_anchors(&ODOMETER_ANCHOR, text, &mut anchors);
    anchors.sort_by_key(|a| a.start);

    // Both variants anchor on the same date position when they overlap;
    // keep the more specific header (longest, mileage-bearing) per offset.
    anchors.dedup_by(|b, a| {
        if a.start != b.start {
            return false;
        }
        if b.header_end > a.header_end || (a.mileage_raw.is_none() && b.mileage_raw.is_some()) {
            a.header_end = b.header_end;
            a.date = b.date.clone();
            a.mileage_raw = b.mileage_raw.take();
        }
        true
    });

    let cutoff = terminal_cutoff(text);
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut spans = Vec::new();

    for (i, anchor) in anchors.iter().enumerate() {
        if anchor.start >= cutoff {
            continue;
        }

        // Body runs to the next distinct anchor, the terminal marker, or
        // end of text. Variant anchors at the same position are handled by
        // the dedup key, not here.
        let next_start = anchors[i + 1..]
            .iter()
            .map(|a| a.start)
            .find(|s| *s > anchor.start)
            .unwrap_or(text.len());
        let end = next_start.min(cutoff).max(anchor.header_end);
        let body = text[anchor.header_end..end].trim().to_string();

        let leading: String = body.chars().take(80).collect::<String>().to_lowercase();
        if contains_any(&leading, BOILERPLATE_PREFIXES) {
            trace!(date = %anchor.date, "dropping boilerplate span");
            continue;
        }

        let key = (
            anchor.date.clone(),
            anchor
                .mileage_raw
                .as_deref()
                .map(|m| m.replace(',', ""))
                .unwrap_or_default(),
        );
        if !seen.insert(key) {
            continue;
        }

        spans.push(RawSpan {
            date: anchor.date.clone(),
            mileage_raw: anchor.mileage_raw.clone(),
            body,
        });
    }

    spans
}
