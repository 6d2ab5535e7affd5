//! Vehicle identity and valuation extraction.
//!
//! Each field applies an ordered fallback list of labeled-value patterns;
//! the first successful match wins and later patterns cover alternate
//! report layouts.

use lazy_static::lazy_static;
use regex::Regex;

use super::numeric::parse_separated_u32;

/// Identity fields lifted from the report header.
#[derive(Debug, Default, Clone)]
pub struct VehicleIdentity {
    pub vin: Option<String>,
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub body_style: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
}

/// Valuation fields from the market-value section.
#[derive(Debug, Default, Clone)]
pub struct Valuation {
    pub retail_value: Option<u32>,
    pub report_date: Option<String>,
}

const KNOWN_MAKES: &str = "Toyota|Honda|Ford|Chevrolet|Chevy|Nissan|Subaru|Mazda|Hyundai|Kia|\
Volkswagen|Jeep|Dodge|Ram|GMC|BMW|Mercedes-Benz|Audi|Lexus|Acura|Infiniti|Volvo|Tesla|\
Buick|Cadillac|Chrysler|Lincoln|Mitsubishi|Porsche|Mini|Fiat";

lazy_static! {
    // 17 characters excluding I, O, Q
    static ref VIN_PATTERN: Regex =
        Regex::new(r"(?i)VIN[:\s#]*([A-HJ-NPR-Z0-9]{17})\b").unwrap();

    /// Ordered layouts for the "2018 Toyota 4Runner SR5" header line. The
    /// known-make layout wins; the last pattern accepts any capitalized
    /// make so unlisted marques still yield an identity.
    static ref VEHICLE_LINE_PATTERNS: Vec<Regex> = vec![
        Regex::new(&format!(
            r"(?im)^\s*((?:19|20)\d{{2}})\s+({KNOWN_MAKES})\s+([A-Za-z0-9][\w-]*)[ \t]*([^\r\n]*?)\s*$"
        ))
        .unwrap(),
        Regex::new(r"(?im)^Vehicle[:\s]+((?:19|20)\d{2})\s+([A-Za-z-]+)\s+([\w-]+)[ \t]*([^\r\n]*?)\s*$")
            .unwrap(),
        Regex::new(r"(?m)^\s*((?:19|20)\d{2})\s+([A-Z][A-Za-z]+(?:-[A-Za-z]+)?)\s+([A-Za-z0-9][\w-]*)[ \t]*([^\r\n]*?)\s*$")
            .unwrap(),
    ];

    static ref BODY_STYLE_PATTERN: Regex =
        Regex::new(r"(?im)^\s*Body\s*(?:Style|Type)[:\s]+([^\r\n]+?)\s*$").unwrap();

    static ref ENGINE_PATTERN: Regex =
        Regex::new(r"(?im)^\s*Engine[:\s]+([^\r\n]+?)\s*$").unwrap();

    static ref FUEL_PATTERN: Regex =
        Regex::new(r"(?i)Fuel(?:\s*Type)?[:\s]+(Gasoline|Diesel|Hybrid|Electric|Flex[- ]?Fuel)")
            .unwrap();

    static ref DRIVETRAIN_PATTERN: Regex =
        Regex::new(r"(?i)Drive(?:train|\s*Type)?[:\s]+(4WD|AWD|FWD|RWD|4X4|2WD)").unwrap();

    /// Retail-value layouts, most explicit first.
    static ref RETAIL_VALUE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Retail\s+Value[:\s]*\$\s*([\d,]+)").unwrap(),
        Regex::new(r"(?i)\$\s*([\d,]+)\s+Retail\s+Value").unwrap(),
    ];

    static ref REPORT_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Report\s+(?:Run\s+)?Date[:\s]+(\d{1,2}/\d{1,2}/\d{4})").unwrap(),
        Regex::new(r"(?i)Date\s+of\s+Report[:\s]+(\d{1,2}/\d{1,2}/\d{4})").unwrap(),
    ];
}

fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<regex::Captures<'t>> {
    patterns.iter().find_map(|p| p.captures(text))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn extract_vehicle_identity(text: &str) -> VehicleIdentity {
    let mut identity = VehicleIdentity::default();

    identity.vin = VIN_PATTERN
        .captures(text)
        .map(|c| c[1].to_uppercase());

    if let Some(caps) = first_capture(&VEHICLE_LINE_PATTERNS, text) {
        identity.year = caps[1].parse::<u16>().ok();
        identity.make = non_empty(&caps[2]);
        identity.model = non_empty(&caps[3]);
        identity.trim = caps.get(4).and_then(|m| non_empty(m.as_str()));
    }

    identity.body_style = BODY_STYLE_PATTERN
        .captures(text)
        .and_then(|c| non_empty(&c[1]));
    identity.engine = ENGINE_PATTERN.captures(text).and_then(|c| non_empty(&c[1]));
    identity.fuel_type = FUEL_PATTERN.captures(text).map(|c| c[1].to_string());
    identity.drivetrain = DRIVETRAIN_PATTERN
        .captures(text)
        .map(|c| c[1].to_uppercase());

    identity
}

pub fn extract_valuation(text: &str) -> Valuation {
    Valuation {
        retail_value: first_capture(&RETAIL_VALUE_PATTERNS, text)
            .and_then(|c| parse_separated_u32(&c[1])),
        report_date: first_capture(&REPORT_DATE_PATTERNS, text).map(|c| c[1].to_string()),
    }
}
