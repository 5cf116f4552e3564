//! Product Model (货品)
//!
//! Catalog products are owned by the point-of-sale system; the office
//! server only reads them, except for the stock-sync side channel that
//! refreshes `system_stock` from upstream.

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Category reference
    pub category_id: i64,
    /// Sale price per unit (2 decimal places)
    pub unit_price: f64,
    /// System-recorded stock quantity
    pub system_stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product with category name (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductWithCategory {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub unit_price: f64,
    pub system_stock: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
