//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Client, LoyaltySnapshot};

use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::{AppError, AppResult};

/// GET /api/clients/:id - client profile with loyalty account
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;
    Ok(Json(client))
}

/// GET /api/clients/:id/loyalty - snapshot for cart pricing
pub async fn get_loyalty(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LoyaltySnapshot>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;
    Ok(Json(LoyaltySnapshot::from(&client)))
}
