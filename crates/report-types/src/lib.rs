pub mod types;

pub use types::{
    CpoInfo, DealerInfo, ExtractedReport, MaintenanceLogEntry, OwnerType, OwnershipInfo,
    ReportDocument, ServiceCategory, ServiceRecord, TitleInfo, WarrantyInfo, LOG_SOURCE,
};
