//! Back-in-stock sweep worker
//!
//! Periodically cross-references stock subscriptions against inventory
//! and fires a back-in-stock alert through the shared notification
//! dispatcher for every subscription whose (product, location) has
//! stock again. Subscriptions are one-shot: each is deleted after its
//! alert is dispatched.
//!
//! Everything here is best-effort; a failing sweep logs and waits for
//! the next tick.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::db::repository::{location, product, stock_subscription};

/// Run the sweep loop until shutdown is requested.
pub async fn run(state: ServerState, shutdown: CancellationToken) {
    let interval_secs = state.config.stock_sweep_interval_secs;
    tracing::info!(interval_secs, "Stock sweep worker started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    // The first tick fires immediately; skip it so a fresh boot does not
    // race the migrations-warm pool.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("Stock sweep worker shutting down");
                break;
            }
            _ = interval.tick() => {
                sweep_once(&state).await;
            }
        }
    }
}

/// One sweep pass: alert and delete every subscription back in stock.
pub async fn sweep_once(state: &ServerState) {
    let due = match stock_subscription::find_back_in_stock(&state.pool).await {
        Ok(subs) => subs,
        Err(e) => {
            tracing::error!(error = %e, "Stock sweep query failed");
            return;
        }
    };

    if due.is_empty() {
        return;
    }

    tracing::info!(count = due.len(), "Dispatching back-in-stock alerts");

    for sub in due {
        let product_name = match product::find_by_id(&state.pool, sub.product_id).await {
            Ok(Some(p)) => p.name,
            Ok(None) => {
                // Product vanished from the catalog: the subscription is dead weight.
                tracing::warn!(subscription_id = sub.id, product_id = sub.product_id, "Subscribed product no longer exists, dropping subscription");
                let _ = stock_subscription::delete(&state.pool, sub.id).await;
                continue;
            }
            Err(e) => {
                tracing::warn!(subscription_id = sub.id, error = %e, "Failed to load product for stock alert");
                continue;
            }
        };

        let location_name = match location::find_by_id(&state.pool, sub.location_id).await {
            Ok(Some(l)) => l.name,
            _ => format!("location {}", sub.location_id),
        };

        state
            .notifier
            .send_stock_alert(&sub.channel, &product_name, &location_name)
            .await;

        // One-shot: drop the subscription once the alert has been dispatched.
        if let Err(e) = stock_subscription::delete(&state.pool, sub.id).await {
            tracing::warn!(subscription_id = sub.id, error = %e, "Failed to delete fired subscription");
        }
    }
}
