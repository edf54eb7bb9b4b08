//! Product Repository

use super::RepoResult;
use shared::models::Product;
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, category, cash_price, card_price, sort_order, is_active, created_at, updated_at FROM product";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE id = ?", PRODUCT_SELECT);
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch active products for a set of IDs (checkout re-pricing).
///
/// Missing or inactive IDs are simply absent from the result; the
/// caller decides whether that is an error.
pub async fn find_active_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Product>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "{} WHERE is_active = 1 AND id IN ({})",
        PRODUCT_SELECT, placeholders
    );
    let mut query = sqlx::query_as::<_, Product>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}
