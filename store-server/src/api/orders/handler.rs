//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::Order;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub client_id: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Query params identifying the acting client
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub client_id: i64,
}

/// GET /api/orders?client_id= - a client's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_by_client(&state.pool, query.client_id, query.limit, query.offset)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - order detail with lines
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id?client_id= - owner soft-delete
///
/// Flips status to DELETED; the row is kept. Only the owning client
/// can delete, and only while the order is still in a core-produced
/// status.
pub async fn soft_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<bool>> {
    let deleted = order::soft_delete(&state.pool, id, query.client_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Order {} not found or not deletable",
            id
        )));
    }
    Ok(Json(true))
}
