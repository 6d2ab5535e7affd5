//! Heuristic extraction pipeline for vehicle-history-report text.
//!
//! The engine is a pure function from newline-joined report text to an
//! [`ExtractedReport`]: no I/O, no shared mutable state, no fatal errors.
//! Fields a pattern cannot positively establish stay absent; a document
//! with nothing recognizable yields an empty report, never an error.

pub mod classify;
pub mod extractors;
pub mod patterns;
pub mod schedule;
pub mod segment;

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use report_types::{
    ExtractedReport, MaintenanceLogEntry, OwnerType, ReportDocument, ServiceRecord, LOG_SOURCE,
};
use schedule::MaintenanceSchedule;

const SERVICE_TYPE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 500;
const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Extraction engine entry point. Holds the read-only maintenance schedule
/// consulted by the classifier; everything else is stateless.
pub struct ReportEngine {
    schedule: MaintenanceSchedule,
}

impl ReportEngine {
    pub fn new() -> Self {
        Self {
            schedule: MaintenanceSchedule::builtin(),
        }
    }

    pub fn with_schedule(schedule: MaintenanceSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &MaintenanceSchedule {
        &self.schedule
    }

    /// Parse one document's full text into an [`ExtractedReport`].
    pub fn parse(&self, text: &str) -> ExtractedReport {
        let identity = extractors::vehicle::extract_vehicle_identity(text);
        let valuation = extractors::vehicle::extract_valuation(text);
        let (owners, ownership) = extractors::ownership::extract_ownership(text);
        let title = extractors::title::extract_title_info(text);
        let warranty = extractors::warranty::extract_warranty_info(text);
        let cpo = extractors::warranty::extract_cpo_info(text);

        let service_records = self.extract_service_records(text);

        // Accident count always comes from the title section, not a
        // separate counter.
        let accidents = title.as_ref().map(|t| t.accidents_reported).unwrap_or(0);
        let personal_vehicle = ownership
            .as_ref()
            .and_then(|o| o.owner_type)
            .map(|t| t == OwnerType::Personal)
            .unwrap_or(false);

        debug!(
            records = service_records.len(),
            vin = identity.vin.is_some(),
            "report parsed"
        );

        ExtractedReport {
            vin: identity.vin,
            year: identity.year,
            make: identity.make,
            model: identity.model,
            trim: identity.trim,
            body_style: identity.body_style,
            engine: identity.engine,
            fuel_type: identity.fuel_type,
            drivetrain: identity.drivetrain,
            retail_value: valuation.retail_value,
            report_date: valuation.report_date,
            owners,
            accidents,
            no_accidents: accidents == 0,
            single_owner: owners == Some(1),
            has_service_history: !service_records.is_empty(),
            personal_vehicle,
            ownership,
            title,
            warranty,
            cpo,
            total_records: service_records.len(),
            service_records,
        }
    }

    /// Convenience for page-structured input: pages are joined with
    /// newlines, exactly as the text-extraction collaborator delivers them.
    pub fn parse_document(&self, document: &ReportDocument) -> ExtractedReport {
        self.parse(&document.text_content.join("\n"))
    }

    fn extract_service_records(&self, text: &str) -> Vec<ServiceRecord> {
        let spans = segment::segment_records(text);
        debug!(spans = spans.len(), "segmented service spans");

        let mut records = Vec::new();
        for span in spans {
            // Header mileage first; recover from the body when the header
            // had none. Out-of-range candidates are dropped, not errors.
            let mileage = span
                .mileage_raw
                .as_deref()
                .and_then(extractors::numeric::parse_separated_u32)
                .filter(|m| extractors::numeric::mileage_in_range(*m))
                .or_else(|| extractors::numeric::extract_mileage(&span.body));

            let description = clean_description(&span.body);
            if description.len() < 3 {
                continue;
            }

            let (service_type, category) = classify::classify_service(&self.schedule, &description);
            let location = extractors::dealer::extract_location(&description);
            let dealer = extractors::dealer::extract_dealer(&span.body);
            let service_items = classify::extract_service_items(&span.body);

            records.push(ServiceRecord {
                date: span.date,
                mileage,
                service_type: truncate_chars(&service_type, SERVICE_TYPE_MAX_CHARS),
                description: truncate_with_ellipsis(&description, DESCRIPTION_MAX_CHARS),
                location,
                category,
                dealer,
                service_items,
            });
        }

        // Span dedup keys on the raw mileage string; this second pass keys
        // on the resolved value so no two records share (date, mileage).
        let mut seen: HashSet<(String, Option<u32>)> = HashSet::new();
        records.retain(|r| seen.insert((r.date.clone(), r.mileage)));

        records.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
        records
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first; ties broken by mileage; a date that fails to parse sorts
/// as the oldest possible date rather than raising.
fn sort_key(record: &ServiceRecord) -> (NaiveDate, u32) {
    let date = NaiveDate::parse_from_str(&record.date, REPORT_DATE_FORMAT)
        .unwrap_or(NaiveDate::MIN);
    (date, record.mileage.unwrap_or(0))
}

fn clean_description(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_start_matches(['-', '\u{2022}', ' '])
        .to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    }
}

/// Flatten a parsed report into maintenance-log rows. Dates are rewritten
/// to `YYYY-MM-DD` when the original parses as `MM/DD/YYYY`; otherwise the
/// raw string passes through unchanged.
pub fn convert_to_maintenance_log(report: &ExtractedReport) -> Vec<MaintenanceLogEntry> {
    report
        .service_records
        .iter()
        .map(|record| {
            let date = NaiveDate::parse_from_str(&record.date, REPORT_DATE_FORMAT)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|_| record.date.clone());
            MaintenanceLogEntry {
                date,
                mileage: record.mileage,
                service_type: record.service_type.clone(),
                description: record.description.clone(),
                category: record.category,
                location: record.location.clone(),
                source: LOG_SOURCE.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_types::ServiceCategory;

    #[test]
    fn test_single_record_scenario() {
        let engine = ReportEngine::new();
        let report = engine.parse("03/15/2022 45,230 Oil and filter changed");

        assert_eq!(report.total_records, 1);
        let record = &report.service_records[0];
        assert_eq!(record.date, "03/15/2022");
        assert_eq!(record.mileage, Some(45230));
        assert_eq!(record.category, ServiceCategory::Maintenance);
        assert_eq!(record.service_type, "Oil & Filter Change");
        assert!(report.has_service_history);
    }

    #[test]
    fn test_report_serializes_with_stable_keys() {
        let engine = ReportEngine::new();
        let report = engine.parse("03/15/2022 45,230 Oil and filter changed");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["total_records"], 1);
        assert_eq!(value["service_records"][0]["category"], "maintenance");
        assert!(value["vin"].is_null());
    }

    #[test]
    fn test_duplicate_header_keeps_first_description() {
        let engine = ReportEngine::new();
        let text = "03/15/2022 45,230 Oil and filter changed\n\
                    03/15/2022 45,230 Brake pads replaced";
        let report = engine.parse(text);
        assert_eq!(report.total_records, 1);
        assert_eq!(report.service_records[0].description, "Oil and filter changed");
    }

    #[test]
    fn test_records_sorted_newest_first() {
        let engine = ReportEngine::new();
        let text = "01/10/2021 30,100 Tire rotation performed\n\
                    03/15/2022 45,230 Oil and filter changed\n\
                    06/20/2021 35,500 Coolant flush";
        let report = engine.parse(text);
        let dates: Vec<&str> = report
            .service_records
            .iter()
            .map(|r| r.date.as_str())
            .collect();
        assert_eq!(dates, vec!["03/15/2022", "06/20/2021", "01/10/2021"]);
    }

    #[test]
    fn test_same_date_sorted_by_mileage_desc() {
        let engine = ReportEngine::new();
        let text = "03/15/2022 45,230 Oil and filter changed\n\
                    03/15/2022 45,600 Tire rotation performed";
        let report = engine.parse(text);
        assert_eq!(report.service_records[0].mileage, Some(45600));
        assert_eq!(report.service_records[1].mileage, Some(45230));
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let engine = ReportEngine::new();
        let report = engine.parse("");
        assert_eq!(report.total_records, 0);
        assert!(report.service_records.is_empty());
        assert!(report.vin.is_none());
        assert!(report.owners.is_none());
        assert!(report.ownership.is_none());
        assert!(report.title.is_none());
        assert!(report.warranty.is_none());
        assert!(report.cpo.is_none());
        assert!(report.no_accidents);
        assert!(!report.single_owner);
        assert!(!report.has_service_history);
        assert!(!report.personal_vehicle);
    }

    #[test]
    fn test_garbage_input_is_not_an_error() {
        let engine = ReportEngine::new();
        let report = engine.parse("%%%% **** ???? 12 random words, none of them useful");
        assert_eq!(report.total_records, 0);
    }

    #[test]
    fn test_accidents_derived_from_title_section() {
        let engine = ReportEngine::new();
        let report = engine.parse("Title History\n2 accidents reported");
        assert_eq!(report.accidents, 2);
        assert!(!report.no_accidents);
        assert_eq!(report.title.unwrap().accidents_reported, 2);
    }

    #[test]
    fn test_single_owner_flag() {
        let engine = ReportEngine::new();
        let report = engine.parse("1-Owner vehicle");
        assert_eq!(report.owners, Some(1));
        assert!(report.single_owner);

        let report = engine.parse("Owners reported: 3");
        assert!(!report.single_owner);
    }

    #[test]
    fn test_conversion_rewrites_parseable_dates() {
        let engine = ReportEngine::new();
        let report = engine.parse("03/15/2022 45,230 Oil and filter changed");
        let log = convert_to_maintenance_log(&report);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].date, "2022-03-15");
        // Source tag comes from the shared-types crate root
        assert_eq!(log[0].source, report_types::LOG_SOURCE);
        assert_eq!(log[0].source, "history_report");
        assert_eq!(log[0].category, ServiceCategory::Maintenance);
    }

    #[test]
    fn test_conversion_passes_malformed_dates_through() {
        let record = ServiceRecord {
            date: "13/45/9999".to_string(),
            mileage: None,
            service_type: "Service".to_string(),
            description: "unknown".to_string(),
            location: None,
            category: ServiceCategory::Maintenance,
            dealer: None,
            service_items: Vec::new(),
        };
        let report = ExtractedReport {
            vin: None,
            year: None,
            make: None,
            model: None,
            trim: None,
            body_style: None,
            engine: None,
            fuel_type: None,
            drivetrain: None,
            retail_value: None,
            report_date: None,
            owners: None,
            accidents: 0,
            no_accidents: true,
            single_owner: false,
            has_service_history: true,
            personal_vehicle: false,
            ownership: None,
            title: None,
            warranty: None,
            cpo: None,
            total_records: 1,
            service_records: vec![record],
        };
        let log = convert_to_maintenance_log(&report);
        assert_eq!(log[0].date, "13/45/9999");
    }

    #[test]
    fn test_description_truncation() {
        let engine = ReportEngine::new();
        let long_tail = "word ".repeat(200);
        let text = format!("03/15/2022 45,230 Oil and filter changed {long_tail}");
        let report = engine.parse(&text);
        let desc = &report.service_records[0].description;
        assert_eq!(desc.chars().count(), DESCRIPTION_MAX_CHARS);
        assert!(desc.ends_with("..."));
    }

    #[test]
    fn test_parse_document_joins_pages() {
        let engine = ReportEngine::new();
        let doc = ReportDocument::new(
            "doc-1",
            "report.txt",
            vec![
                "VIN: JTEBU5JR8J5123456".to_string(),
                "03/15/2022 45,230 Oil and filter changed".to_string(),
            ],
        );
        let report = engine.parse_document(&doc);
        assert_eq!(report.vin.as_deref(), Some("JTEBU5JR8J5123456"));
        assert_eq!(report.total_records, 1);
    }

    #[test]
    fn test_dealer_block_attached_to_record() {
        let engine = ReportEngine::new();
        let text = "03/15/2022 45,230 Oil and filter changed\n\
                    Riverside Toyota Service Center\n\
                    Springfield, IL\n\
                    (217) 555-0134\n\
                    4.6/5.0\n\
                    1,284 Verified Reviews";
        let report = engine.parse(text);
        assert_eq!(report.total_records, 1);
        let dealer = report.service_records[0].dealer.as_ref().unwrap();
        assert_eq!(dealer.name, "Riverside Toyota Service Center");
        assert_eq!(dealer.rating, Some(4.6));
    }

    #[test]
    fn test_service_items_on_record() {
        let engine = ReportEngine::new();
        let text = "03/15/2022 45,230 Oil and filter changed\nTire rotation performed";
        let report = engine.parse(text);
        assert_eq!(
            report.service_records[0].service_items,
            vec![
                "Oil and filter changed".to_string(),
                "Tire rotation performed".to_string(),
            ]
        );
    }

    #[test]
    fn test_mileage_recovered_from_body() {
        let engine = ReportEngine::new();
        let report = engine.parse("03/15/2022 Serviced at 45,230 miles, oil changed");
        assert_eq!(report.service_records[0].mileage, Some(45230));
    }
}
