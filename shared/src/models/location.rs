//! Location Model

use serde::{Deserialize, Serialize};

/// Pickup location entity.
///
/// The location name keys the notification channel routing table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
}
