//! Order Repository
//!
//! Orders are append-only; the only mutation the storefront performs is
//! the owner's soft-delete status transition.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderLine, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, client_id, location_id, payment_method, status, subtotal, volume_discount, cash_savings, loyalty_discount, coins_redeemed, coins_earned, total, comment, request_key, created_at FROM client_order";

const LINE_SELECT: &str = "SELECT product_id, name, quantity, unit_cash_price, unit_card_price, payment_override, unit_price, line_total FROM order_line WHERE order_id = ? ORDER BY line_no";

/// Insert an order and its frozen lines in one transaction.
pub async fn create(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO client_order (id, client_id, location_id, payment_method, status, subtotal, volume_discount, cash_savings, loyalty_discount, coins_redeemed, coins_earned, total, comment, request_key, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(order.client_id)
    .bind(order.location_id)
    .bind(order.payment_method)
    .bind(order.status)
    .bind(order.subtotal)
    .bind(order.volume_discount)
    .bind(order.cash_savings)
    .bind(order.loyalty_discount)
    .bind(order.coins_redeemed)
    .bind(order.coins_earned)
    .bind(order.total)
    .bind(&order.comment)
    .bind(&order.request_key)
    .bind(order.created_at)
    .execute(&mut *tx)
    .await?;

    for (line_no, line) in order.lines.iter().enumerate() {
        sqlx::query(
            "INSERT INTO order_line (order_id, line_no, product_id, name, quantity, unit_cash_price, unit_card_price, payment_override, unit_price, line_total) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id)
        .bind(line_no as i64)
        .bind(line.product_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_cash_price)
        .bind(line.unit_card_price)
        .bind(line.payment_override)
        .bind(line.unit_price)
        .bind(line.line_total)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

async fn load_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(LINE_SELECT)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(lines)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match order {
        Some(mut order) => {
            order.lines = load_lines(pool, order.id).await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

/// Look up a prior order by its idempotency key.
pub async fn find_by_request_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE request_key = ?", ORDER_SELECT);
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(key)
        .fetch_optional(pool)
        .await?;
    match order {
        Some(mut order) => {
            order.lines = load_lines(pool, order.id).await?;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

/// A client's orders, newest first.
pub async fn find_by_client(
    pool: &SqlitePool,
    client_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{} WHERE client_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
        ORDER_SELECT
    );
    let mut orders = sqlx::query_as::<_, Order>(&sql)
        .bind(client_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    for order in &mut orders {
        order.lines = load_lines(pool, order.id).await?;
    }
    Ok(orders)
}

/// Owner soft-delete: flips status to DELETED, never removes the row.
/// Only orders still in a core-produced status can be deleted by their
/// owner; staff-progressed orders are out of the client's hands.
pub async fn soft_delete(pool: &SqlitePool, id: i64, client_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE client_order SET status = ? WHERE id = ? AND client_id = ? AND status IN (?, ?)",
    )
    .bind(OrderStatus::Deleted)
    .bind(id)
    .bind(client_id)
    .bind(OrderStatus::New)
    .bind(OrderStatus::Preorder)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// True when an insert failed because the idempotency key already has
/// an order (two concurrent submits racing past the lookup).
pub fn is_request_key_conflict(err: &RepoError) -> bool {
    matches!(err, RepoError::Duplicate(msg) if msg.contains("request_key"))
}
