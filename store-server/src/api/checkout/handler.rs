//! Checkout API Handlers

use axum::{Json, extract::State};
use shared::models::{CheckoutRequest, CheckoutResponse};

use crate::checkout;
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/checkout - place an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let response = checkout::process_checkout(&state, payload).await?;
    Ok(Json(response))
}
