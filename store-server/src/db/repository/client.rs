//! Client Repository

use super::RepoResult;
use shared::models::{Client, LoyaltySnapshot};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let row = sqlx::query_as::<_, Client>(
        "SELECT id, name, phone, coin_balance, lifetime_spend, order_count, discount_tier_percent, last_activity_at, created_at, updated_at FROM client WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn loyalty_snapshot(pool: &SqlitePool, id: i64) -> RepoResult<Option<LoyaltySnapshot>> {
    let row = sqlx::query_as::<_, LoyaltySnapshot>(
        "SELECT coin_balance, lifetime_spend, order_count, discount_tier_percent FROM client WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Persist the recomputed loyalty state after an order commit.
///
/// Writes all four derived fields plus the activity timestamp in one
/// statement. Returns false when the client row no longer exists.
pub async fn update_loyalty(
    pool: &SqlitePool,
    id: i64,
    snapshot: &LoyaltySnapshot,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE client SET coin_balance = ?1, lifetime_spend = ?2, order_count = ?3, discount_tier_percent = ?4, last_activity_at = ?5, updated_at = ?5 WHERE id = ?6",
    )
    .bind(snapshot.coin_balance)
    .bind(snapshot.lifetime_spend)
    .bind(snapshot.order_count)
    .bind(snapshot.discount_tier_percent)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
