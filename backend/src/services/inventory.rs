//! Inventory view service
//!
//! Serves the reconciled inventory grid: fetch the batch snapshot from the
//! external service, collapse it through the shared reconciler, apply the
//! display filter, and optionally export the result as CSV.

use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::InventoryClient;
use shared::{
    filter_item_views, reconcile_batches, validate_batch, ItemView, ItemViewFilter,
};

/// Inventory service
#[derive(Clone)]
pub struct InventoryService {
    inventory: InventoryClient,
}

/// Query parameters for the CSV export window
#[derive(Debug, Deserialize, Validate)]
pub struct ExportQuery {
    /// Number of trailing months of purchases to include (1-24)
    #[validate(range(min = 1, max = 24))]
    #[serde(default = "default_export_months")]
    pub months: u32,
}

fn default_export_months() -> u32 {
    12
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(inventory: InventoryClient) -> Self {
        Self { inventory }
    }

    /// Reconciled, filtered item views for the inventory grid
    pub async fn get_item_views(&self, filter: &ItemViewFilter) -> AppResult<Vec<ItemView>> {
        let batches = self.fetch_checked().await?;
        let views = reconcile_batches(&batches, Utc::now());
        Ok(filter_item_views(views, filter))
    }

    /// Export the reconciled view as CSV, limited to purchases within the
    /// trailing `months` window
    pub async fn export_csv(&self, query: &ExportQuery) -> AppResult<String> {
        query.validate().map_err(|_| AppError::Validation {
            field: "months".to_string(),
            message: "Export window must be between 1 and 24 months".to_string(),
        })?;

        let now = Utc::now();
        let cutoff = now - Duration::days(query.months as i64 * 30);
        let batches: Vec<_> = self
            .fetch_checked()
            .await?
            .into_iter()
            .filter(|b| b.purchase_date.map(|d| d >= cutoff).unwrap_or(true))
            .collect();

        let views = reconcile_batches(&batches, now);
        export_to_csv(&views)
    }

    /// Fetch the snapshot and log ledger inconsistencies; offending
    /// records still flow through, the engine tolerates them
    async fn fetch_checked(&self) -> AppResult<Vec<shared::InventoryBatch>> {
        let batches = self.inventory.fetch_batches().await?;
        for batch in &batches {
            if let Err(reason) = validate_batch(batch) {
                tracing::warn!("Inconsistent inventory record '{}': {}", batch.item_name, reason);
            }
        }
        Ok(batches)
    }
}

/// Serialize records as CSV
fn export_to_csv<T: serde::Serialize>(data: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_query_bounds() {
        assert!(ExportQuery { months: 1 }.validate().is_ok());
        assert!(ExportQuery { months: 24 }.validate().is_ok());
        assert!(ExportQuery { months: 0 }.validate().is_err());
        assert!(ExportQuery { months: 25 }.validate().is_err());
    }

    #[test]
    fn csv_export_includes_header_row() {
        use chrono::TimeZone;
        use rust_decimal::Decimal;

        let batch = shared::InventoryBatch {
            item_name: "Carrot".to_string(),
            category: "Vegetables".to_string(),
            purchase_date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            expiry_date: Some(Utc.with_ymd_and_hms(2024, 6, 9, 0, 0, 0).unwrap()),
            quantity_purchased: Decimal::from(25),
            quantity_used: Decimal::from(5),
            quantity_wasted: Decimal::ZERO,
            cost_per_unit: Decimal::ONE,
            storage_temperature: Decimal::ZERO,
            humidity: Decimal::ZERO,
        };
        let views = reconcile_batches(&[batch], Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());
        let csv = export_to_csv(&views).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().contains("item_name"));
        assert!(lines.next().unwrap().contains("Carrot"));
    }
}
