//! Stock Subscription API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StockSubscription, StockSubscriptionCreate};

use crate::core::ServerState;
use crate::db::repository::stock_subscription;
use crate::utils::{AppError, AppResult};

/// POST /api/stock-subscriptions - subscribe to a back-in-stock alert
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StockSubscriptionCreate>,
) -> AppResult<Json<StockSubscription>> {
    if payload.client_id <= 0 || payload.product_id <= 0 || payload.location_id <= 0 {
        return Err(AppError::Validation(
            "client, product and location ids are required".into(),
        ));
    }
    if payload.channel.trim().is_empty() {
        return Err(AppError::Validation("delivery channel is required".into()));
    }

    let subscription = stock_subscription::create(&state.pool, payload).await?;
    Ok(Json(subscription))
}

/// DELETE /api/stock-subscriptions/:id - unsubscribe
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = stock_subscription::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("Subscription {} not found", id)));
    }
    Ok(Json(true))
}
