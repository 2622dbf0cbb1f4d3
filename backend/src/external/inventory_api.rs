//! Inventory API client
//!
//! Fetches raw batch records from the external inventory service and
//! coerces the duck-typed JSON into domain types at this single boundary.
//! Missing fields degrade to empty strings and zeros, unparseable dates to
//! `None`; a bad record never aborts a fetch.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use shared::InventoryBatch;

/// Client for the external inventory service
#[derive(Clone)]
pub struct InventoryClient {
    client: Client,
    base_url: String,
}

/// Raw inventory record as serialized by the inventory service
#[derive(Debug, Deserialize)]
struct RawInventoryItem {
    #[serde(rename = "Item Name", default)]
    item_name: Option<String>,
    #[serde(rename = "Category", default)]
    category: Option<String>,
    #[serde(rename = "Purchase Date", default)]
    purchase_date: Option<String>,
    #[serde(rename = "Expiry Date", default)]
    expiry_date: Option<String>,
    #[serde(rename = "Quantity Purchased", default)]
    quantity_purchased: Option<f64>,
    #[serde(rename = "Quantity Used", default)]
    quantity_used: Option<f64>,
    #[serde(rename = "Quantity Wasted", default)]
    quantity_wasted: Option<f64>,
    #[serde(rename = "Cost Per Unit", default)]
    cost_per_unit: Option<f64>,
    #[serde(rename = "Storage Temperature", default)]
    storage_temperature: Option<f64>,
    #[serde(rename = "Humidity", default)]
    humidity: Option<f64>,
}

/// Inventory list response envelope
#[derive(Debug, Deserialize)]
struct InventoryListResponse {
    #[serde(default)]
    items: Vec<RawInventoryItem>,
}

impl InventoryClient {
    /// Create a new InventoryClient
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    /// Fetch the full batch collection from the inventory service
    pub async fn fetch_batches(&self) -> AppResult<Vec<InventoryBatch>> {
        let url = format!("{}/inventory-items/", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::InventoryServiceUnavailable(format!("Inventory API request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Inventory API error: {} - {}",
                status, body
            )));
        }

        let data: InventoryListResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse inventory response: {}", e))
        })?;

        Ok(data.items.into_iter().map(into_batch).collect())
    }
}

/// Convert one raw record into a domain batch
fn into_batch(raw: RawInventoryItem) -> InventoryBatch {
    InventoryBatch {
        item_name: raw.item_name.unwrap_or_default(),
        category: raw.category.unwrap_or_default(),
        purchase_date: raw.purchase_date.as_deref().and_then(parse_flexible_date),
        expiry_date: raw.expiry_date.as_deref().and_then(parse_flexible_date),
        quantity_purchased: decimal_or_zero(raw.quantity_purchased),
        quantity_used: decimal_or_zero(raw.quantity_used),
        quantity_wasted: decimal_or_zero(raw.quantity_wasted),
        cost_per_unit: decimal_or_zero(raw.cost_per_unit),
        storage_temperature: decimal_or_zero(raw.storage_temperature),
        humidity: decimal_or_zero(raw.humidity),
    }
}

fn decimal_or_zero(value: Option<f64>) -> Decimal {
    value.and_then(Decimal::from_f64_retain).unwrap_or_default()
}

/// Parse a date accepting RFC 3339 timestamps and the legacy DD-MM-YYYY
/// form still present in older records
fn parse_flexible_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%d-%m-%Y") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    tracing::warn!("Unparseable date in inventory record: {}", value);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_and_legacy_dates() {
        assert_eq!(
            parse_flexible_date("2024-06-01T12:30:00Z"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(
            parse_flexible_date("15-06-2024"),
            Some(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_dates_become_none() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("next tuesday"), None);
        assert_eq!(parse_flexible_date("2024-13-45"), None);
    }

    #[test]
    fn coerces_duck_typed_record() {
        let raw: RawInventoryItem = serde_json::from_value(serde_json::json!({
            "Item Name": "Beef",
            "Category": "Meat",
            "Purchase Date": "2024-06-01T00:00:00Z",
            "Expiry Date": "04-06-2024",
            "Quantity Purchased": 15.0,
            "Quantity Used": 2.0,
            "Quantity Wasted": 1.0,
            "Cost Per Unit": 5.5,
            "Storage Temperature": 4.0,
            "Humidity": 60.0
        }))
        .unwrap();
        let batch = into_batch(raw);
        assert_eq!(batch.item_name, "Beef");
        assert_eq!(batch.quantity_purchased, Decimal::new(15, 0));
        assert_eq!(batch.cost_per_unit, Decimal::new(55, 1));
        assert!(batch.purchase_date.is_some());
        assert!(batch.expiry_date.is_some());
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let raw: RawInventoryItem = serde_json::from_value(serde_json::json!({
            "Item Name": "Mystery"
        }))
        .unwrap();
        let batch = into_batch(raw);
        assert_eq!(batch.category, "");
        assert_eq!(batch.purchase_date, None);
        assert_eq!(batch.quantity_purchased, Decimal::ZERO);
        assert_eq!(batch.remaining(), Decimal::ZERO);
    }

    #[test]
    fn bad_date_becomes_sentinel_scoring_input() {
        let raw: RawInventoryItem = serde_json::from_value(serde_json::json!({
            "Item Name": "Beef",
            "Purchase Date": "not a date",
            "Expiry Date": "2024-06-04T00:00:00Z",
            "Quantity Purchased": 5.0
        }))
        .unwrap();
        let batch = into_batch(raw);
        assert_eq!(batch.purchase_date, None);
        let assessment =
            shared::score_freshness(batch.purchase_date, batch.expiry_date, Utc::now());
        assert_eq!(assessment.freshness_percent, 0);
    }
}
