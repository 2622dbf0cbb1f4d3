//! Waste analytics service
//!
//! Assembles the full waste report and the ranked recommendations for the
//! analytics view. All computation happens in the shared engine; this
//! service only fetches the snapshot and splits the report for the API.

use chrono::Utc;

use crate::error::AppResult;
use crate::external::InventoryClient;
use shared::{
    aggregate_waste, reconcile_batches, synthesize_recommendations, FreshnessTier, ItemView,
    Recommendation, StockStatus, WastePolicy, WasteReport,
};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    inventory: InventoryClient,
    policy: WastePolicy,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(inventory: InventoryClient, policy: WastePolicy) -> Self {
        Self { inventory, policy }
    }

    /// Full waste report over the current batch snapshot
    pub async fn waste_report(&self) -> AppResult<WasteReport> {
        let batches = self.inventory.fetch_batches().await?;
        Ok(aggregate_waste(&batches, Utc::now(), &self.policy))
    }

    /// Ranked action items derived from the current report and the
    /// freshness tiers of in-stock items
    pub async fn recommendations(&self) -> AppResult<Vec<Recommendation>> {
        let now = Utc::now();
        let batches = self.inventory.fetch_batches().await?;

        let report = aggregate_waste(&batches, now, &self.policy);
        let in_stock: Vec<ItemView> = reconcile_batches(&batches, now)
            .into_iter()
            .filter(|v| v.stock_status == StockStatus::InStock)
            .collect();

        let critical: Vec<ItemView> = in_stock
            .iter()
            .filter(|v| v.status == FreshnessTier::Critical)
            .cloned()
            .collect();
        let warning: Vec<ItemView> = in_stock
            .iter()
            .filter(|v| v.status == FreshnessTier::Warning)
            .cloned()
            .collect();
        let good: Vec<ItemView> = in_stock
            .iter()
            .filter(|v| matches!(v.status, FreshnessTier::Good | FreshnessTier::Excellent))
            .cloned()
            .collect();

        Ok(synthesize_recommendations(&report.item_analysis, &critical, &warning, &good))
    }
}
