//! Inventory Repository

use super::RepoResult;
use shared::models::InventoryRecord;
use sqlx::SqlitePool;

pub async fn find(
    pool: &SqlitePool,
    product_id: i64,
    location_id: i64,
) -> RepoResult<Option<InventoryRecord>> {
    let row = sqlx::query_as::<_, InventoryRecord>(
        "SELECT product_id, location_id, quantity FROM inventory WHERE product_id = ? AND location_id = ?",
    )
    .bind(product_id)
    .bind(location_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Atomically decrement on-hand stock, clamped at zero.
///
/// A single UPDATE does the arithmetic in SQL, so concurrent checkouts
/// against the same row cannot lose updates. Returns the number of rows
/// affected: 0 means there is no inventory record for this
/// (product, location) pair, which callers treat as a silent skip.
pub async fn decrement_clamped(
    pool: &SqlitePool,
    product_id: i64,
    location_id: i64,
    quantity: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE inventory SET quantity = MAX(quantity - ?, 0) WHERE product_id = ? AND location_id = ?",
    )
    .bind(quantity)
    .bind(product_id)
    .bind(location_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Upsert an inventory record (receiving stock / admin tooling).
pub async fn set_quantity(
    pool: &SqlitePool,
    product_id: i64,
    location_id: i64,
    quantity: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO inventory (product_id, location_id, quantity) VALUES (?1, ?2, ?3) ON CONFLICT(product_id, location_id) DO UPDATE SET quantity = ?3",
    )
    .bind(product_id)
    .bind(location_id)
    .bind(quantity)
    .execute(pool)
    .await?;
    Ok(())
}
