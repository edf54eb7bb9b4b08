//! Fulfillment Orchestrator
//!
//! Turns a checkout request into a committed order in a single pass:
//! validate, deduplicate, re-price from the canonical catalog, persist,
//! then run the best-effort bookkeeping (inventory decrement, loyalty
//! recompute) and fire detached notifications.
//!
//! Failure policy: everything up to and including the order insert is
//! fatal to the request; everything after it is logged and swallowed —
//! checkout never blocks on secondary bookkeeping. There are no
//! internal retries; a retried submit is the client's concern and is
//! deduplicated through the optional request key.

use shared::cart::{Cart, CartLine, MAX_COMMENT_LEN, MAX_QUANTITY, PaymentMethod};
use shared::loyalty;
use shared::models::{
    CheckoutRequest, CheckoutResponse, Location, LoyaltySnapshot, Order, OrderLine, OrderStatus,
};
use sqlx::SqlitePool;

use crate::core::ServerState;
use crate::db::repository::{client, inventory, location, order, product};
use crate::utils::{AppError, AppResult};

/// Process one checkout request end to end.
pub async fn process_checkout(
    state: &ServerState,
    req: CheckoutRequest,
) -> AppResult<CheckoutResponse> {
    // 1. Validate (no side effects on failure)
    validate_request(&req)?;

    // 2. Deduplicate replayed submissions by request key
    if let Some(key) = &req.request_key
        && let Some(existing) = order::find_by_request_key(&state.pool, key).await?
    {
        tracing::info!(
            order_id = existing.id,
            request_key = %key,
            "Duplicate checkout submission, returning existing order"
        );
        let loyalty = current_loyalty(&state.pool, existing.client_id).await;
        return Ok(CheckoutResponse {
            order: existing,
            loyalty,
        });
    }

    // 3. Resolve the pickup location and re-price from the catalog
    let pickup = resolve_location(&state.pool, req.location_id).await?;
    let order = price_order(&state.pool, &req).await?;

    // 4. Persist the order — the only fatal write
    if let Err(e) = order::create(&state.pool, &order).await {
        // Two concurrent submits with the same key can race past the
        // lookup in step 2; the unique index turns the loser into a read.
        if order::is_request_key_conflict(&e)
            && let Some(key) = &req.request_key
            && let Ok(Some(existing)) = order::find_by_request_key(&state.pool, key).await
        {
            let loyalty = current_loyalty(&state.pool, existing.client_id).await;
            return Ok(CheckoutResponse {
                order: existing,
                loyalty,
            });
        }
        return Err(AppError::from(e));
    }

    tracing::info!(
        order_id = order.id,
        client_id = order.client_id,
        total = order.total,
        "Order created"
    );

    // 5. Decrement inventory (best-effort, only with a pickup location)
    if let Some(location_id) = order.location_id {
        apply_inventory_decrements(&state.pool, &order, location_id).await;
    }

    // 6. Recompute and persist loyalty state (best-effort)
    let loyalty = settle_loyalty(&state.pool, &order).await;

    // 7. Dispatch notifications, detached from the response path
    let notifier = state.notifier.clone();
    let summary_order = order.clone();
    let location_name = pickup.map(|l| l.name);
    tokio::spawn(async move {
        notifier
            .send_order_summary(&summary_order, location_name.as_deref())
            .await;
    });

    // 8. Respond
    Ok(CheckoutResponse { order, loyalty })
}

/// Reject malformed requests before anything is written.
fn validate_request(req: &CheckoutRequest) -> AppResult<()> {
    if req.client_id <= 0 {
        return Err(AppError::Validation("client id is required".into()));
    }
    if req.lines.is_empty() {
        return Err(AppError::Validation(
            "order must contain at least one line".into(),
        ));
    }
    for line in &req.lines {
        if line.product_id <= 0 {
            return Err(AppError::Validation("line is missing a product id".into()));
        }
        if line.quantity <= 0 {
            return Err(AppError::Validation(format!(
                "quantity must be positive, got {}",
                line.quantity
            )));
        }
        if line.quantity > MAX_QUANTITY {
            return Err(AppError::Validation(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, line.quantity
            )));
        }
    }
    if let Some(comment) = &req.comment
        && comment.chars().count() > MAX_COMMENT_LEN
    {
        return Err(AppError::Validation(format!(
            "comment exceeds maximum length ({})",
            MAX_COMMENT_LEN
        )));
    }
    Ok(())
}

/// Look up the pickup location when one was requested.
async fn resolve_location(
    pool: &SqlitePool,
    location_id: Option<i64>,
) -> AppResult<Option<Location>> {
    let Some(id) = location_id else {
        return Ok(None);
    };
    let found = location::find_by_id(pool, id).await?;
    match found {
        Some(loc) if loc.is_active => Ok(Some(loc)),
        _ => Err(AppError::Validation(format!(
            "unknown pickup location: {id}"
        ))),
    }
}

/// Rebuild the cart against canonical catalog prices and derive the
/// authoritative totals.
///
/// The client's own price math is never trusted: unknown or inactive
/// products reject the request, and a submitted expected total that
/// disagrees with the server-derived one rejects it too, so stale carts
/// re-sync instead of silently paying a different price.
async fn price_order(pool: &SqlitePool, req: &CheckoutRequest) -> AppResult<Order> {
    let product_ids: Vec<i64> = req.lines.iter().map(|l| l.product_id).collect();
    let products = product::find_active_by_ids(pool, &product_ids).await?;

    let mut cart = Cart {
        lines: Vec::with_capacity(req.lines.len()),
        pickup_location_id: req.location_id,
        payment_method: req.payment_method,
        coins_to_redeem: req.coins_to_redeem,
        comment: req.comment.clone(),
    };

    for line in &req.lines {
        let Some(p) = products.iter().find(|p| p.id == line.product_id) else {
            return Err(AppError::Validation(format!(
                "unknown product: {}",
                line.product_id
            )));
        };
        // Overrides only exist in mixed mode; uniform modes must not
        // carry stale per-line choices into the frozen snapshot.
        let payment_override = if req.payment_method == PaymentMethod::Mixed {
            line.payment_override
        } else {
            None
        };
        cart.add_line(CartLine {
            product_id: p.id,
            name: p.name.clone(),
            quantity: line.quantity,
            unit_cash_price: p.cash_price,
            unit_card_price: p.card_price,
            payment_override,
        });
    }

    // Absent client = guest-like flow: zero balance, tier 0.
    let account = client::loyalty_snapshot(pool, req.client_id)
        .await?
        .unwrap_or_default();

    let totals = cart.totals(&account);

    if let Some(expected) = req.expected_total
        && expected != totals.total
    {
        return Err(AppError::BusinessRule(format!(
            "order total changed: cart shows {}, current price is {}",
            expected, totals.total
        )));
    }

    let lines = cart
        .lines
        .iter()
        .map(|l| {
            let unit_price = l.effective_unit_price(cart.payment_method);
            OrderLine {
                product_id: l.product_id,
                name: l.name.clone(),
                quantity: l.quantity,
                unit_cash_price: l.unit_cash_price,
                unit_card_price: l.unit_card_price,
                payment_override: l.payment_override,
                unit_price,
                line_total: unit_price * l.quantity,
            }
        })
        .collect();

    // Location chosen => a pickup order; otherwise a preorder to be
    // arranged with the store.
    let status = if req.location_id.is_some() {
        OrderStatus::New
    } else {
        OrderStatus::Preorder
    };

    Ok(Order {
        id: shared::util::snowflake_id(),
        client_id: req.client_id,
        location_id: req.location_id,
        payment_method: req.payment_method,
        status,
        lines,
        subtotal: totals.subtotal,
        volume_discount: totals.volume_discount,
        cash_savings: totals.cash_savings,
        loyalty_discount: totals.loyalty_discount,
        coins_redeemed: totals.coins_redeemed,
        coins_earned: totals.coins_earned,
        total: totals.total,
        comment: req.comment.clone(),
        request_key: req.request_key.clone(),
        created_at: shared::util::now_millis(),
    })
}

/// Decrement on-hand stock for every line, independently.
///
/// Each line is one atomic clamped UPDATE; a missing inventory record
/// affects zero rows and is skipped silently, and a failing line never
/// rolls back the order or the other lines.
async fn apply_inventory_decrements(pool: &SqlitePool, order: &Order, location_id: i64) {
    for line in &order.lines {
        match inventory::decrement_clamped(pool, line.product_id, location_id, line.quantity).await
        {
            Ok(0) => {
                tracing::debug!(
                    product_id = line.product_id,
                    location_id,
                    "No inventory record, decrement skipped"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    order_id = order.id,
                    product_id = line.product_id,
                    location_id,
                    error = %e,
                    "Inventory decrement failed"
                );
            }
        }
    }
}

/// Recompute the client's loyalty state from its current stored values
/// and persist it. Returns the refreshed snapshot, or `None` when the
/// client record is absent or the write degraded.
async fn settle_loyalty(pool: &SqlitePool, order: &Order) -> Option<LoyaltySnapshot> {
    let current = match client::loyalty_snapshot(pool, order.client_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            tracing::debug!(client_id = order.client_id, "No client record, skipping loyalty update");
            return None;
        }
        Err(e) => {
            tracing::warn!(order_id = order.id, error = %e, "Loyalty read failed");
            return None;
        }
    };

    let new_spend = current.lifetime_spend + order.total;
    let updated = LoyaltySnapshot {
        coin_balance: (current.coin_balance - order.coins_redeemed + order.coins_earned).max(0),
        lifetime_spend: new_spend,
        order_count: current.order_count + 1,
        discount_tier_percent: loyalty::tier_percent(new_spend),
    };

    match client::update_loyalty(pool, order.client_id, &updated).await {
        Ok(true) => Some(updated),
        Ok(false) => {
            tracing::warn!(client_id = order.client_id, "Client disappeared during loyalty update");
            None
        }
        Err(e) => {
            tracing::warn!(order_id = order.id, error = %e, "Loyalty update failed, order stands");
            None
        }
    }
}

/// Fresh loyalty snapshot for responses that did not change it.
async fn current_loyalty(pool: &SqlitePool, client_id: i64) -> Option<LoyaltySnapshot> {
    client::loyalty_snapshot(pool, client_id)
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests;
