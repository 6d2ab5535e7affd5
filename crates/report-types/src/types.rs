//! Domain model for vehicle-history-report extraction.
//!
//! These types are the contract between the extraction engine and its
//! consumers (persistence layer, JSON API). They carry no extraction logic.

use serde::{Deserialize, Serialize};

/// A source document handed to the engine: per-page text plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub id: String,
    pub filename: String,
    pub pages: u32,
    pub text_content: Vec<String>, // Per-page text
    pub created_at: u64,
}

impl ReportDocument {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            pages: pages.len() as u32,
            text_content: pages,
            created_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}

/// Service event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Maintenance,
    Repair,
    Inspection,
    Recall,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Maintenance => "maintenance",
            ServiceCategory::Repair => "repair",
            ServiceCategory::Inspection => "inspection",
            ServiceCategory::Recall => "recall",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the current owner used the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Personal,
    Commercial,
    Rental,
    Lease,
}

/// One service event recovered from the report's history section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Raw date string as it appeared in the report (`MM/DD/YYYY`).
    pub date: String,
    /// Odometer reading; always strictly within (0, 500000) when present.
    pub mileage: Option<u32>,
    pub service_type: String,
    pub description: String,
    pub location: Option<String>,
    pub category: ServiceCategory,
    pub dealer: Option<DealerInfo>,
    /// Individual service-item phrases pulled out of the description.
    pub service_items: Vec<String>,
}

/// Dealer block attached to a service record when the report carries one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerInfo {
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f32>, // 0.0 - 5.0
    pub review_count: Option<u32>,
}

/// Current-owner detail. `owner_number` is always 1; the report only ever
/// breaks out the current owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipInfo {
    pub owner_number: u32,
    pub year_purchased: Option<u16>,
    pub owner_type: Option<OwnerType>,
    pub length_of_ownership: Option<String>,
    /// State codes in the order the report listed them, no duplicates.
    pub states: Vec<String>,
    pub annual_miles: Option<u32>,
    pub last_odometer: Option<u32>,
}

impl Default for OwnershipInfo {
    fn default() -> Self {
        Self {
            owner_number: 1,
            year_purchased: None,
            owner_type: None,
            length_of_ownership: None,
            states: Vec::new(),
            annual_miles: None,
            last_odometer: None,
        }
    }
}

/// Title-history flags.
///
/// The issue flags (`total_loss`, `structural_damage`, `airbag_deployed`,
/// `odometer_rollback`, `recalls_reported`) default to "issue present" and
/// flip to false only when the report carries the canonical clearing phrase.
/// The `*_clear` brand flags are the same rule with inverted naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleInfo {
    pub damage_brands_clear: bool,
    pub odometer_brands_clear: bool,
    pub total_loss: bool,
    pub structural_damage: bool,
    pub airbag_deployed: bool,
    pub odometer_rollback: bool,
    pub accidents_reported: u32,
    pub recalls_reported: bool,
}

/// Warranty coverage flags; same absence-implies-expired convention as
/// [`TitleInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyInfo {
    pub basic_expired: bool,
    pub drivetrain_expired: bool,
    pub rust_expired: bool,
    pub roadside_expired: bool,
}

/// Certified Pre-Owned block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpoInfo {
    pub certified: bool,
    pub tier: Option<String>,
    pub warranty_terms: Option<String>,
    pub inspection_points: Option<u32>,
}

/// Root aggregate produced by one parse call. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedReport {
    pub vin: Option<String>,
    pub year: Option<u16>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub body_style: Option<String>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,

    pub retail_value: Option<u32>,
    pub report_date: Option<String>,

    pub owners: Option<u32>,
    pub accidents: u32,

    // Value-factor flags derived by the assembler
    pub no_accidents: bool,
    pub single_owner: bool,
    pub has_service_history: bool,
    pub personal_vehicle: bool,

    pub ownership: Option<OwnershipInfo>,
    pub title: Option<TitleInfo>,
    pub warranty: Option<WarrantyInfo>,
    pub cpo: Option<CpoInfo>,

    /// Always equals `service_records.len()`.
    pub total_records: usize,
    /// Ordered newest-first by (date, mileage).
    pub service_records: Vec<ServiceRecord>,
}

/// Flat row consumed by the maintenance-log store and the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    /// `YYYY-MM-DD` when the record date parsed as `MM/DD/YYYY`, otherwise
    /// the raw string unchanged.
    pub date: String,
    pub mileage: Option<u32>,
    pub service_type: String,
    pub description: String,
    pub category: ServiceCategory,
    pub location: Option<String>,
    pub source: String,
}

/// Source tag written on every converted maintenance-log row.
pub const LOG_SOURCE: &str = "history_report";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServiceCategory::Maintenance).unwrap(),
            "\"maintenance\""
        );
        assert_eq!(
            serde_json::to_string(&ServiceCategory::Recall).unwrap(),
            "\"recall\""
        );
        assert_eq!(ServiceCategory::Inspection.as_str(), "inspection");
    }

    #[test]
    fn test_owner_type_round_trip() {
        let t: OwnerType = serde_json::from_str("\"personal\"").unwrap();
        assert_eq!(t, OwnerType::Personal);
        assert_eq!(serde_json::to_string(&OwnerType::Lease).unwrap(), "\"lease\"");
    }

    #[test]
    fn test_maintenance_log_entry_wire_shape() {
        let entry = MaintenanceLogEntry {
            date: "2022-03-15".to_string(),
            mileage: Some(45230),
            service_type: "Oil & Filter Change".to_string(),
            description: "Oil and filter changed".to_string(),
            category: ServiceCategory::Maintenance,
            location: None,
            source: LOG_SOURCE.to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2022-03-15");
        assert_eq!(json["mileage"], 45230);
        assert_eq!(json["category"], "maintenance");
        assert_eq!(json["source"], "history_report");
    }

    #[test]
    fn test_document_pages_count() {
        let doc = ReportDocument::new("doc-1", "report.txt", vec!["page one".into(), "page two".into()]);
        assert_eq!(doc.pages, 2);
        assert_eq!(doc.text_content.len(), 2);
    }

    #[test]
    fn test_ownership_defaults_to_first_owner() {
        let o = OwnershipInfo::default();
        assert_eq!(o.owner_number, 1);
        assert!(o.states.is_empty());
    }
}
