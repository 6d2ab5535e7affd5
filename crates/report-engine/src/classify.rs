//! Service-event classification.
//!
//! Priority order, stopping at the first success:
//! 1. taxonomy lookup against the maintenance schedule (keeps extracted
//!    names consistent with the canonical keys used elsewhere),
//! 2. the declarative rule table below, grouped maintenance -> repair ->
//!    inspection -> recall,
//! 3. a coarse keyword fallback.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::ServiceCategory;

use crate::patterns::{contains_any, INSPECTION_FALLBACK_KEYWORDS, REPAIR_FALLBACK_KEYWORDS};
use crate::schedule::MaintenanceSchedule;

macro_rules! rule {
    ($pattern:expr, $category:expr, $label:expr) => {
        (Regex::new($pattern).unwrap(), $category, $label)
    };
}

lazy_static! {
    /// Ordered (pattern, category, label) rules. Order is significant:
    /// earlier rules win, and categories are grouped in fixed priority.
    static ref CLASSIFICATION_RULES: Vec<(Regex, ServiceCategory, &'static str)> = {
        use ServiceCategory::*;
        vec![
            // Maintenance
            rule!(r"oil\s*(?:&|and)?\s*filter", Maintenance, "Oil & Filter Change"),
            rule!(r"oil\s+change", Maintenance, "Oil Change"),
            rule!(r"lube\s*[,\s]*oil", Maintenance, "Oil & Filter Change"),
            rule!(r"tire\s+rotation", Maintenance, "Tire Rotation"),
            rule!(r"rotate\s+tires?", Maintenance, "Tire Rotation"),
            rule!(r"balance\s+tires?", Maintenance, "Tire Balance"),
            rule!(r"wheel\s+alignment", Maintenance, "Wheel Alignment"),
            rule!(r"cabin\s+(?:air\s+)?filter", Maintenance, "Cabin Air Filter"),
            rule!(r"hvac\s+filter", Maintenance, "Cabin Air Filter"),
            rule!(r"engine\s+filter", Maintenance, "Engine Air Filter"),
            rule!(r"air\s+filter", Maintenance, "Air Filter"),
            rule!(r"brake\s+fluid", Maintenance, "Brake Fluid Service"),
            rule!(r"transmission\s+(?:fluid|service)", Maintenance, "Transmission Service"),
            rule!(r"coolant\s+(?:flush|service)?", Maintenance, "Coolant Service"),
            rule!(r"antifreeze", Maintenance, "Coolant Service"),
            rule!(r"spark\s+plug", Maintenance, "Spark Plugs"),
            rule!(r"battery\s+(?:replace|service|install)", Maintenance, "Battery Service"),
            rule!(r"wiper\s+blade", Maintenance, "Wiper Blades"),
            rule!(r"serpentine\s+belt", Maintenance, "Serpentine Belt"),
            rule!(r"timing\s+belt", Maintenance, "Timing Belt"),
            rule!(r"drive\s+belt", Maintenance, "Drive Belt"),
            rule!(r"front\s+differential", Maintenance, "Front Differential Service"),
            rule!(r"rear\s+differential", Maintenance, "Rear Differential Service"),
            rule!(r"differential\s+(?:fluid|service)", Maintenance, "Differential Service"),
            rule!(r"transfer\s+case", Maintenance, "Transfer Case Service"),
            rule!(r"power\s+steering\s+fluid", Maintenance, "Power Steering Fluid"),
            rule!(r"multi[- ]?point\s+inspection", Maintenance, "Multi-Point Inspection"),
            rule!(r"factory\s+scheduled", Maintenance, "Factory Scheduled Maintenance"),
            rule!(r"scheduled\s+maintenance", Maintenance, "Scheduled Maintenance"),
            // Repair
            rule!(r"brake\s+(?:pad|shoe)s?\s+(?:replace|install)", Repair, "Brake Pad Replacement"),
            rule!(r"(?:front|rear)\s+brake\s+(?:pad|shoe)", Repair, "Brake Pad Replacement"),
            rule!(r"rotor\s+(?:replace|resurface|machine)", Repair, "Rotor Service"),
            rule!(r"brake\s+repair", Repair, "Brake Repair"),
            rule!(r"alternator", Repair, "Alternator Replacement"),
            rule!(r"starter\s+(?:motor|replace)", Repair, "Starter Replacement"),
            rule!(r"water\s+pump", Repair, "Water Pump Replacement"),
            rule!(r"thermostat", Repair, "Thermostat Replacement"),
            rule!(r"radiator\s+(?:replace|repair)", Repair, "Radiator Service"),
            rule!(r"a/?c\s+(?:service|repair|recharge)", Repair, "A/C Service"),
            rule!(r"air\s+conditioning", Repair, "A/C Service"),
            rule!(r"suspension\s+(?:repair|service)", Repair, "Suspension Repair"),
            rule!(r"shock\s+(?:absorber)?s?", Repair, "Shock Absorber Replacement"),
            rule!(r"strut", Repair, "Strut Replacement"),
            rule!(r"cv\s+(?:joint|axle|boot)", Repair, "CV Joint/Axle Service"),
            rule!(r"exhaust\s+(?:repair|replace)", Repair, "Exhaust Repair"),
            rule!(r"muffler", Repair, "Muffler Replacement"),
            rule!(r"catalytic\s+converter", Repair, "Catalytic Converter"),
            // Inspection
            rule!(r"(?:safety|state)\s+inspection", Inspection, "Safety Inspection"),
            rule!(r"emissions?\s+(?:test|inspection)", Inspection, "Emissions Inspection"),
            rule!(r"smog\s+(?:check|test)", Inspection, "Smog Check"),
            rule!(r"vehicle\s+inspection", Inspection, "Vehicle Inspection"),
            rule!(r"pre[- ]?purchase\s+inspection", Inspection, "Pre-Purchase Inspection"),
            // Recall
            rule!(r"recall\s+(?:repair|service|performed)", Recall, "Recall Service"),
            rule!(r"safety\s+recall", Recall, "Safety Recall"),
            rule!(r"manufacturer\s+recall", Recall, "Manufacturer Recall"),
            rule!(r"campaign", Recall, "Recall Campaign"),
        ]
    };

    /// Action verbs marking a fragment as an individual service item.
    static ref SERVICE_ITEM_ACTION: Regex = Regex::new(
        r"(?i)\b(?:changed?|replaced?|rotated?|installed?|performed?|inspected?|checked?|flushed?|serviced?|repaired?|adjusted?|balanced?|aligned?|lubricated?)\b"
    )
    .unwrap();
}

/// Classify a span description into a canonical service type and category.
pub fn classify_service(
    schedule: &MaintenanceSchedule,
    description: &str,
) -> (String, ServiceCategory) {
    // Tier 1: curated taxonomy
    if let Some(item) = schedule
        .service_key_for(description)
        .and_then(|key| schedule.item(key))
    {
        return (item.name.to_string(), ServiceCategory::Maintenance);
    }

    // Tier 2: declarative rule table
    let desc_lower = description.to_lowercase();
    for (pattern, category, label) in CLASSIFICATION_RULES.iter() {
        if pattern.is_match(&desc_lower) {
            return (label.to_string(), *category);
        }
    }

    // Tier 3: coarse keyword fallback
    if contains_any(&desc_lower, REPAIR_FALLBACK_KEYWORDS) {
        return ("Repair Service".to_string(), ServiceCategory::Repair);
    }
    if contains_any(&desc_lower, INSPECTION_FALLBACK_KEYWORDS) {
        return ("Inspection".to_string(), ServiceCategory::Inspection);
    }

    ("Service".to_string(), ServiceCategory::Maintenance)
}

/// Pull individual service-item phrases out of a span body: short fragments
/// carrying an action verb, in document order.
pub fn extract_service_items(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    for fragment in body.split(['\n', ',', ';', '\u{2022}']) {
        let fragment = fragment.trim().trim_start_matches(['-', '*', ' ']);
        if fragment.len() < 4 || fragment.len() > 120 {
            continue;
        }
        if SERVICE_ITEM_ACTION.is_match(fragment) {
            let item = fragment.to_string();
            if !items.contains(&item) {
                items.push(item);
            }
        }
        if items.len() == 10 {
            break;
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(description: &str) -> (String, ServiceCategory) {
        classify_service(&MaintenanceSchedule::builtin(), description)
    }

    #[test]
    fn test_taxonomy_tier_wins() {
        let (name, category) = classify("Oil and filter changed");
        assert_eq!(name, "Oil & Filter Change");
        assert_eq!(category, ServiceCategory::Maintenance);
    }

    #[test]
    fn test_rule_tier_repair() {
        let (name, category) = classify("alternator failed and was swapped");
        assert_eq!(name, "Alternator Replacement");
        assert_eq!(category, ServiceCategory::Repair);
    }

    #[test]
    fn test_rule_tier_recall() {
        let (name, category) = classify("safety recall completed by dealer");
        assert_eq!(name, "Safety Recall");
        assert_eq!(category, ServiceCategory::Recall);
    }

    #[test]
    fn test_keyword_fallback_inspection() {
        // No taxonomy keyword and no rule matches "tires checked"
        let (name, category) = classify("tires checked");
        assert_eq!(name, "Inspection");
        assert_eq!(category, ServiceCategory::Inspection);
    }

    #[test]
    fn test_keyword_fallback_repair() {
        let (name, category) = classify("windshield fixed");
        assert_eq!(name, "Repair Service");
        assert_eq!(category, ServiceCategory::Repair);
    }

    #[test]
    fn test_default_is_generic_maintenance() {
        let (name, category) = classify("courtesy wash");
        assert_eq!(name, "Service");
        assert_eq!(category, ServiceCategory::Maintenance);
    }

    #[test]
    fn test_emissions_inspection_rule() {
        let (name, category) = classify("emissions test passed");
        assert_eq!(name, "Emissions Inspection");
        assert_eq!(category, ServiceCategory::Inspection);
    }

    #[test]
    fn test_service_items() {
        let body = "Oil and filter changed\nTire rotation performed\nFluids checked\nVehicle washed";
        let items = extract_service_items(body);
        assert_eq!(
            items,
            vec![
                "Oil and filter changed".to_string(),
                "Tire rotation performed".to_string(),
                "Fluids checked".to_string(),
            ]
        );
    }

    #[test]
    fn test_service_items_skip_long_fragments() {
        let long = "a".repeat(200);
        assert!(extract_service_items(&format!("{long} changed")).is_empty());
        assert!(extract_service_items("washed").is_empty());
    }
}
