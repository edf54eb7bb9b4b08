//! Location Repository

use super::RepoResult;
use shared::models::Location;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Location>> {
    let row = sqlx::query_as::<_, Location>(
        "SELECT id, name, address, is_active FROM location WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
