//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Categories partition the catalog ("drinks", "tobacco", "snacks", ...).
/// Replacement pairings during reconciliation are only valid inside one
/// category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
