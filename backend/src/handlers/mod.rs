//! HTTP handlers for the Kitchen Waste Management API

pub mod analytics;
pub mod health;
pub mod inventory;
pub mod spoilage;

pub use analytics::*;
pub use health::*;
pub use inventory::*;
pub use spoilage::*;
