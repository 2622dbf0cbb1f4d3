//! Inventory batch models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchased lot of a single item, with its own expiry and quantity
/// ledger. Batches are created and mutated by the external inventory
/// service; this engine only reads and classifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryBatch {
    /// Free-text item name; identity key after trimming and case-folding
    pub item_name: String,
    /// Raw category string as recorded upstream. Normalize with
    /// [`normalize_category`](super::normalize_category) before grouping.
    pub category: String,
    /// `None` when the upstream record carried an unparseable date
    pub purchase_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub quantity_purchased: Decimal,
    pub quantity_used: Decimal,
    pub quantity_wasted: Decimal,
    pub cost_per_unit: Decimal,
    /// Advisory storage conditions, not used in scoring
    pub storage_temperature: Decimal,
    pub humidity: Decimal,
}

impl InventoryBatch {
    /// Units still on hand: purchased minus used minus wasted.
    ///
    /// Can go negative when the upstream ledger is inconsistent; see
    /// [`validate_quantity_ledger`](crate::validation::validate_quantity_ledger).
    pub fn remaining(&self) -> Decimal {
        self.quantity_purchased - self.quantity_used - self.quantity_wasted
    }

    /// A batch is in stock while any quantity remains
    pub fn in_stock(&self) -> bool {
        self.remaining() > Decimal::ZERO
    }

    /// Cost of the wasted portion of this batch
    pub fn cost_wasted(&self) -> Decimal {
        self.quantity_wasted * self.cost_per_unit
    }

    /// Purchase value of the whole batch
    pub fn purchase_value(&self) -> Decimal {
        self.quantity_purchased * self.cost_per_unit
    }

    /// Sort key for shelf ordering: expiry date, falling back to purchase
    /// date. Batches with neither keep their insertion order.
    pub(crate) fn shelf_order_key(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.or(self.purchase_date)
    }
}
