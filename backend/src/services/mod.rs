//! Business logic services for the Kitchen Waste Management platform

pub mod analytics;
pub mod inventory;
pub mod spoilage;

pub use analytics::AnalyticsService;
pub use inventory::InventoryService;
pub use spoilage::SpoilageService;
