//! Inventory Model

use serde::{Deserialize, Serialize};

/// Per-(product, location) on-hand quantity.
///
/// Quantity is floor-clamped at zero: a decrement larger than on-hand
/// stock empties the record rather than failing the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryRecord {
    pub product_id: i64,
    pub location_id: i64,
    pub quantity: i64,
}
