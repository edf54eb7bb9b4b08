//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity with its embedded loyalty account.
///
/// Loyalty fields are mutated only by the checkout path after a
/// successful order write; the discount tier is derived from lifetime
/// spend and never decreases on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    /// Coin balance (1 coin ≈ 1 currency unit of price reduction)
    pub coin_balance: i64,
    /// Cumulative historical spend, in whole currency units
    pub lifetime_spend: i64,
    pub order_count: i64,
    /// Discount percentage unlocked by lifetime spend: 0, 3, 5 or 10
    pub discount_tier_percent: i64,
    pub last_activity_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// The slice of a client the pricing engine and checkout response use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltySnapshot {
    pub coin_balance: i64,
    pub lifetime_spend: i64,
    pub order_count: i64,
    pub discount_tier_percent: i64,
}

impl From<&Client> for LoyaltySnapshot {
    fn from(client: &Client) -> Self {
        Self {
            coin_balance: client.coin_balance,
            lifetime_spend: client.lifetime_spend,
            order_count: client.order_count,
            discount_tier_percent: client.discount_tier_percent,
        }
    }
}
