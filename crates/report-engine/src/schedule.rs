//! Factory maintenance schedule: the canonical taxonomy of service keys.
//!
//! The table is read-only, built once at startup, and passed explicitly into
//! the engine. Classification consults it as its first tier so extracted
//! service names stay consistent with the canonical names used by the
//! reminder-scheduling side of the system.

use report_types::ServiceCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One canonical maintenance action with its interval and cost metadata.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceItem {
    pub key: &'static str,
    pub name: &'static str,
    pub interval_miles: u32,
    pub interval_months: u32,
    pub description: &'static str,
    pub category: ServiceCategory,
    pub priority: Priority,
    pub estimated_cost: u32,
}

const SCHEDULE_ITEMS: &[MaintenanceItem] = &[
    MaintenanceItem {
        key: "oil_change",
        name: "Oil & Filter Change",
        interval_miles: 5_000,
        interval_months: 6,
        description: "Replace engine oil and oil filter",
        category: ServiceCategory::Maintenance,
        priority: Priority::High,
        estimated_cost: 75,
    },
    MaintenanceItem {
        key: "tire_rotation",
        name: "Tire Rotation",
        interval_miles: 5_000,
        interval_months: 6,
        description: "Rotate tires to ensure even wear",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 40,
    },
    MaintenanceItem {
        key: "air_filter",
        name: "Engine Air Filter",
        interval_miles: 30_000,
        interval_months: 36,
        description: "Replace engine air filter element",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 45,
    },
    MaintenanceItem {
        key: "cabin_filter",
        name: "Cabin Air Filter",
        interval_miles: 15_000,
        interval_months: 12,
        description: "Replace cabin air filter for HVAC system",
        category: ServiceCategory::Maintenance,
        priority: Priority::Low,
        estimated_cost: 35,
    },
    MaintenanceItem {
        key: "brake_fluid",
        name: "Brake Fluid",
        interval_miles: 30_000,
        interval_months: 36,
        description: "Inspect and replace brake fluid",
        category: ServiceCategory::Maintenance,
        priority: Priority::High,
        estimated_cost: 100,
    },
    MaintenanceItem {
        key: "transmission_fluid",
        name: "Transmission Fluid",
        interval_miles: 60_000,
        interval_months: 72,
        description: "Replace automatic transmission fluid",
        category: ServiceCategory::Maintenance,
        priority: Priority::High,
        estimated_cost: 200,
    },
    MaintenanceItem {
        key: "coolant",
        name: "Engine Coolant",
        interval_miles: 100_000,
        interval_months: 120,
        description: "Replace engine coolant (first at 100k, then every 50k)",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 150,
    },
    MaintenanceItem {
        key: "spark_plugs",
        name: "Spark Plugs",
        interval_miles: 120_000,
        interval_months: 120,
        description: "Replace spark plugs",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 250,
    },
    MaintenanceItem {
        key: "drive_belt",
        name: "Drive Belt",
        interval_miles: 100_000,
        interval_months: 120,
        description: "Inspect and replace drive belt",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 200,
    },
    MaintenanceItem {
        key: "differential_fluid_front",
        name: "Front Differential Fluid",
        interval_miles: 30_000,
        interval_months: 36,
        description: "Replace front differential fluid (4WD)",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 100,
    },
    MaintenanceItem {
        key: "differential_fluid_rear",
        name: "Rear Differential Fluid",
        interval_miles: 30_000,
        interval_months: 36,
        description: "Replace rear differential fluid",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 100,
    },
    MaintenanceItem {
        key: "transfer_case_fluid",
        name: "Transfer Case Fluid",
        interval_miles: 30_000,
        interval_months: 36,
        description: "Replace transfer case fluid (4WD)",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 100,
    },
    MaintenanceItem {
        key: "brake_pads_front",
        name: "Front Brake Pads",
        interval_miles: 40_000,
        interval_months: 48,
        description: "Inspect and replace front brake pads",
        category: ServiceCategory::Maintenance,
        priority: Priority::High,
        estimated_cost: 300,
    },
    MaintenanceItem {
        key: "brake_pads_rear",
        name: "Rear Brake Pads",
        interval_miles: 50_000,
        interval_months: 60,
        description: "Inspect and replace rear brake pads",
        category: ServiceCategory::Maintenance,
        priority: Priority::High,
        estimated_cost: 250,
    },
    MaintenanceItem {
        key: "battery",
        name: "Battery",
        interval_miles: 50_000,
        interval_months: 48,
        description: "Inspect and replace battery",
        category: ServiceCategory::Maintenance,
        priority: Priority::Medium,
        estimated_cost: 200,
    },
    MaintenanceItem {
        key: "wiper_blades",
        name: "Wiper Blades",
        interval_miles: 15_000,
        interval_months: 12,
        description: "Replace windshield wiper blades",
        category: ServiceCategory::Maintenance,
        priority: Priority::Low,
        estimated_cost: 40,
    },
];

/// Free-text keyword -> canonical service key. First match wins, so the
/// more specific phrases ("front differential", "cabin air filter") must
/// come before their generic prefixes.
const KEYWORD_MAP: &[(&str, &str)] = &[
    // Oil changes
    ("oil change", "oil_change"),
    ("oil and filter", "oil_change"),
    ("oil & filter", "oil_change"),
    ("engine oil", "oil_change"),
    ("lube oil filter", "oil_change"),
    // Tire rotation
    ("tire rotation", "tire_rotation"),
    ("rotate tires", "tire_rotation"),
    ("tire service", "tire_rotation"),
    // Air filters
    ("cabin air filter", "cabin_filter"),
    ("cabin filter", "cabin_filter"),
    ("hvac filter", "cabin_filter"),
    ("engine air filter", "air_filter"),
    ("air filter", "air_filter"),
    // Fluids
    ("brake fluid", "brake_fluid"),
    ("transmission fluid", "transmission_fluid"),
    ("transmission service", "transmission_fluid"),
    ("coolant flush", "coolant"),
    ("coolant", "coolant"),
    ("antifreeze", "coolant"),
    // Differentials and transfer case
    ("front differential", "differential_fluid_front"),
    ("rear differential", "differential_fluid_rear"),
    ("differential", "differential_fluid_rear"),
    ("transfer case", "transfer_case_fluid"),
    // Brakes
    ("front brake", "brake_pads_front"),
    ("rear brake", "brake_pads_rear"),
    ("brake pad", "brake_pads_front"),
    ("brake service", "brake_pads_front"),
    // Spark plugs
    ("spark plug", "spark_plugs"),
    // Battery
    ("battery", "battery"),
    // Wipers
    ("wiper blade", "wiper_blades"),
    ("wiper", "wiper_blades"),
    // Belt
    ("serpentine belt", "drive_belt"),
    ("drive belt", "drive_belt"),
    ("belt", "drive_belt"),
];

/// Read-only view over the schedule table. `Sync` by construction, so
/// engines sharing one table can parse documents in parallel.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceSchedule {
    items: &'static [MaintenanceItem],
    keyword_map: &'static [(&'static str, &'static str)],
}

impl MaintenanceSchedule {
    /// The built-in factory schedule.
    pub fn builtin() -> Self {
        Self {
            items: SCHEDULE_ITEMS,
            keyword_map: KEYWORD_MAP,
        }
    }

    pub fn item(&self, key: &str) -> Option<&'static MaintenanceItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn items(&self) -> &'static [MaintenanceItem] {
        self.items
    }

    /// Map a free-text service description to a canonical key, if any known
    /// keyword appears in it (case-insensitive substring match).
    pub fn service_key_for(&self, description: &str) -> Option<&'static str> {
        let desc_lower = description.to_lowercase();
        self.keyword_map
            .iter()
            .find(|(keyword, _)| desc_lower.contains(keyword))
            .map(|(_, key)| *key)
    }
}
