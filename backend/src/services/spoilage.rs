//! Spoilage assessment service
//!
//! Freshness view over the trailing purchase window, plus the
//! expiring-items alert list consumed by the dashboard overview.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::external::InventoryClient;
use shared::{reconcile_batches, FreshnessTier, ItemView, StockStatus, WastePolicy};

/// Only purchases within this trailing window are re-assessed; older
/// stock is covered by the inventory view
const ASSESSMENT_WINDOW_DAYS: i64 = 7;

/// Spoilage service
#[derive(Clone)]
pub struct SpoilageService {
    inventory: InventoryClient,
    policy: WastePolicy,
}

/// Assessment of recently purchased items, bucketed by tier
#[derive(Debug, Serialize)]
pub struct SpoilageAssessment {
    pub items: Vec<ItemView>,
    pub critical_count: usize,
    pub warning_count: usize,
    pub good_count: usize,
}

impl SpoilageService {
    /// Create a new SpoilageService instance
    pub fn new(inventory: InventoryClient, policy: WastePolicy) -> Self {
        Self { inventory, policy }
    }

    /// Assess batches purchased within the trailing 7-day window
    pub async fn assess_recent(&self) -> AppResult<SpoilageAssessment> {
        let now = Utc::now();
        let cutoff = now - Duration::days(ASSESSMENT_WINDOW_DAYS);

        let batches: Vec<_> = self
            .inventory
            .fetch_batches()
            .await?
            .into_iter()
            .filter(|b| b.purchase_date.map(|d| d >= cutoff).unwrap_or(false))
            .collect();

        let items = reconcile_batches(&batches, now);
        let critical_count =
            items.iter().filter(|i| i.status == FreshnessTier::Critical).count();
        let warning_count = items.iter().filter(|i| i.status == FreshnessTier::Warning).count();
        let good_count = items
            .iter()
            .filter(|i| matches!(i.status, FreshnessTier::Good | FreshnessTier::Excellent))
            .count();

        Ok(SpoilageAssessment { items, critical_count, warning_count, good_count })
    }

    /// In-stock items whose remaining life is at or below the alert
    /// threshold, soonest-expiring first
    pub async fn expiring_items(&self) -> AppResult<Vec<ItemView>> {
        let now = Utc::now();
        let batches = self.inventory.fetch_batches().await?;

        let mut items: Vec<ItemView> = reconcile_batches(&batches, now)
            .into_iter()
            .filter(|i| {
                i.stock_status == StockStatus::InStock
                    && i.days_remaining <= self.policy.expiry_alert_days
            })
            .collect();
        items.sort_by_key(|i| i.days_remaining);

        Ok(items)
    }
}
