//! Stock Subscription Repository

use super::{RepoError, RepoResult};
use shared::models::{StockSubscription, StockSubscriptionCreate};
use sqlx::SqlitePool;

const SUBSCRIPTION_SELECT: &str = "SELECT id, client_id, product_id, location_id, channel, created_at FROM stock_subscription";

pub async fn create(
    pool: &SqlitePool,
    data: StockSubscriptionCreate,
) -> RepoResult<StockSubscription> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO stock_subscription (id, client_id, product_id, location_id, channel, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.client_id)
    .bind(data.product_id)
    .bind(data.location_id)
    .bind(&data.channel)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create stock subscription".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StockSubscription>> {
    let sql = format!("{} WHERE id = ?", SUBSCRIPTION_SELECT);
    let row = sqlx::query_as::<_, StockSubscription>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM stock_subscription WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Subscriptions whose (product, location) is back in stock.
pub async fn find_back_in_stock(pool: &SqlitePool) -> RepoResult<Vec<StockSubscription>> {
    let rows = sqlx::query_as::<_, StockSubscription>(
        "SELECT s.id, s.client_id, s.product_id, s.location_id, s.channel, s.created_at \
         FROM stock_subscription s \
         JOIN inventory i ON i.product_id = s.product_id AND i.location_id = s.location_id \
         WHERE i.quantity > 0",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
