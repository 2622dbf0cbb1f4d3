//! Batch reconciliation
//!
//! Collapses the raw batch history into the set of records worth
//! displaying: every in-stock batch of an item in shelf order, or a single
//! representative when the item is exhausted. Every distinct item name in
//! the input is represented exactly once as a group.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    normalize_category, score_freshness, FreshnessTier, InventoryBatch, NormalizedCategory,
};

/// Stock status of a reconciled record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

/// UI-facing reconciled record for one batch (or the out-of-stock
/// representative of an exhausted item)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub item_name: String,
    pub category: NormalizedCategory,
    /// Remaining units; zero for an out-of-stock representative
    pub quantity: Decimal,
    pub freshness_percent: u8,
    pub status: FreshnessTier,
    pub days_remaining: i64,
    pub stock_status: StockStatus,
    pub purchase_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Reconcile raw batches into display records.
///
/// Batches group by trimmed, case-folded item name. Within a group, shelf
/// order is ascending expiry date (falling back to purchase date, then
/// insertion order). Groups with stock emit every in-stock batch and
/// suppress exhausted ones; groups without stock emit exactly one
/// representative, the last batch in shelf order.
pub fn reconcile_batches(batches: &[InventoryBatch], now: DateTime<Utc>) -> Vec<ItemView> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&InventoryBatch>> = HashMap::new();

    for batch in batches {
        let key = batch.item_name.trim().to_lowercase();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(batch);
    }

    let mut views = Vec::new();
    for key in order {
        let mut group = groups.remove(&key).unwrap_or_default();
        // Stable sort keeps insertion order for batches without dates
        group.sort_by_key(|b| (b.shelf_order_key().is_none(), b.shelf_order_key()));

        let in_stock: Vec<&InventoryBatch> =
            group.iter().filter(|b| b.in_stock()).copied().collect();

        if !in_stock.is_empty() {
            for batch in in_stock {
                views.push(view_of(batch, StockStatus::InStock, now));
            }
        } else if let Some(batch) = group.last() {
            views.push(view_of(batch, StockStatus::OutOfStock, now));
        }
    }

    views
}

fn view_of(batch: &InventoryBatch, stock_status: StockStatus, now: DateTime<Utc>) -> ItemView {
    let assessment = score_freshness(batch.purchase_date, batch.expiry_date, now);
    ItemView {
        item_name: batch.item_name.trim().to_string(),
        category: normalize_category(&batch.category, &batch.item_name),
        quantity: batch.remaining().max(Decimal::ZERO),
        freshness_percent: assessment.freshness_percent,
        status: assessment.tier,
        days_remaining: assessment.days_remaining,
        stock_status,
        purchase_date: batch.purchase_date,
        expiry_date: batch.expiry_date,
    }
}

/// Display filter applied after reconciliation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemViewFilter {
    /// Case-insensitive substring match over item name and category label
    pub search: Option<String>,
    pub category: Option<NormalizedCategory>,
    pub status: Option<FreshnessTier>,
}

impl ItemViewFilter {
    pub fn matches(&self, view: &ItemView) -> bool {
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !view.item_name.to_lowercase().contains(&needle)
                && !view.category.as_str().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = self.category {
            if view.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if view.status != status {
                return false;
            }
        }
        true
    }
}

/// Apply a display filter to reconciled views
pub fn filter_item_views(views: Vec<ItemView>, filter: &ItemViewFilter) -> Vec<ItemView> {
    views.into_iter().filter(|v| filter.matches(v)).collect()
}
