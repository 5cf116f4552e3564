//! Debt Model (员工挂账)
//!
//! Products taken by staff on credit. Priced at the moment the debt is
//! incurred, so later catalog price changes never move old debts.

use serde::{Deserialize, Serialize};

/// One debt record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DebtRecord {
    pub id: i64,
    pub employee_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price at the time the debt was taken (2 decimal places)
    pub unit_price: f64,
    /// When the debt was incurred (Unix millis)
    pub incurred_at: i64,
    pub note: Option<String>,
}
