//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity — the canonical price source for checkout re-pricing.
///
/// Prices are whole currency units. Catalog convention: `cash_price`
/// never exceeds `card_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    /// Unit price when paying cash
    pub cash_price: i64,
    /// Unit price when paying by card
    pub card_price: i64,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
