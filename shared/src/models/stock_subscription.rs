//! Stock Subscription Model

use serde::{Deserialize, Serialize};

/// Back-in-stock alert subscription.
///
/// One-shot: the sweep deletes the row after the alert fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockSubscription {
    pub id: i64,
    pub client_id: i64,
    pub product_id: i64,
    pub location_id: i64,
    /// Messaging channel the alert is delivered to
    pub channel: String,
    pub created_at: i64,
}

/// Create subscription payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSubscriptionCreate {
    pub client_id: i64,
    pub product_id: i64,
    pub location_id: i64,
    pub channel: String,
}
