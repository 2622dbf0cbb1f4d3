//! Validation utilities for inventory records
//!
//! Violations flag upstream data errors. The engine still aggregates over
//! offending records (every formula floors its denominators), so callers
//! typically log these rather than reject the snapshot.

use rust_decimal::Decimal;

use crate::models::InventoryBatch;

/// Validate the quantity ledger of a batch: all quantities non-negative
/// and `used + wasted <= purchased`
pub fn validate_quantity_ledger(
    purchased: Decimal,
    used: Decimal,
    wasted: Decimal,
) -> Result<(), &'static str> {
    if purchased < Decimal::ZERO || used < Decimal::ZERO || wasted < Decimal::ZERO {
        return Err("Quantities cannot be negative");
    }
    if used + wasted > purchased {
        return Err("Used plus wasted quantity exceeds purchased quantity");
    }
    Ok(())
}

/// Validate a whole batch record
pub fn validate_batch(batch: &InventoryBatch) -> Result<(), &'static str> {
    if batch.item_name.trim().is_empty() {
        return Err("Item name is required");
    }
    if batch.cost_per_unit < Decimal::ZERO {
        return Err("Cost per unit cannot be negative");
    }
    validate_quantity_ledger(
        batch.quantity_purchased,
        batch.quantity_used,
        batch.quantity_wasted,
    )?;
    if let (Some(purchase), Some(expiry)) = (batch.purchase_date, batch.expiry_date) {
        if expiry < purchase {
            return Err("Expiry date precedes purchase date");
        }
    }
    Ok(())
}
