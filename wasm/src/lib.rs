//! WebAssembly module for the Kitchen Waste Management dashboard
//!
//! Provides client-side computation for:
//! - Purchase-time freshness assessment
//! - Category normalization
//! - Freshness tier classification
//! - Offline quantity-ledger validation
//!
//! Timestamps cross the boundary as RFC 3339 strings; the caller supplies
//! `now` so results stay reproducible.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", field, e)))
}

/// Assess a new purchase at entry time. Returns a JSON object with
/// freshness percent, max lifespan, days remaining, spoilage rate, and the
/// high-risk flag.
#[wasm_bindgen]
pub fn assess_new_purchase(
    purchase_date: &str,
    expiry_date: &str,
    now: &str,
) -> Result<String, JsValue> {
    let purchase = parse_timestamp(purchase_date, "purchase date")?;
    let expiry = parse_timestamp(expiry_date, "expiry date")?;
    let now = parse_timestamp(now, "now")?;

    let assessment = shared::assess_purchase(purchase, expiry, now);
    serde_json::to_string(&assessment)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Freshness percentage of a batch evaluated at `now`
#[wasm_bindgen]
pub fn calculate_freshness_percent(
    purchase_date: &str,
    expiry_date: &str,
    now: &str,
) -> Result<u8, JsValue> {
    let purchase = parse_timestamp(purchase_date, "purchase date")?;
    let expiry = parse_timestamp(expiry_date, "expiry date")?;
    let now = parse_timestamp(now, "now")?;

    Ok(shared::score_freshness(Some(purchase), Some(expiry), now).freshness_percent)
}

/// Normalize a raw category/item-name pair to a display label
#[wasm_bindgen]
pub fn normalize_category_label(raw_category: &str, item_name: &str) -> String {
    shared::normalize_category(raw_category, item_name).to_string()
}

/// Classify a freshness percentage and days-remaining pair into a tier key
#[wasm_bindgen]
pub fn classify_freshness_tier(freshness_percent: u8, days_remaining: i32) -> String {
    shared::classify_freshness(freshness_percent, days_remaining as i64)
        .as_str()
        .to_string()
}

/// Validate a quantity ledger before submitting a usage or waste event
#[wasm_bindgen]
pub fn validate_quantity_ledger_values(purchased: f64, used: f64, wasted: f64) -> bool {
    let to_decimal = |v: f64| Decimal::from_f64_retain(v).unwrap_or_default();
    shared::validate_quantity_ledger(to_decimal(purchased), to_decimal(used), to_decimal(wasted))
        .is_ok()
}
