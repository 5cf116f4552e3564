//! Shift Adjustment Model
//!
//! Penalties, bonuses and hookah commission are recorded against a specific
//! shift by the shift-adjustment screens; the payroll engine consumes them
//! read-only.

use serde::{Deserialize, Serialize};

/// Adjustment kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AdjustmentKind {
    /// Deducted from net pay
    Penalty,
    /// Added to net pay
    Bonus,
    /// Hookah sales commission, added to net pay
    HookahCommission,
}

/// One adjustment entry tied to a shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftAdjustment {
    pub id: i64,
    pub shift_id: i64,
    /// Denormalized from the shift for range queries
    pub employee_id: i64,
    pub kind: AdjustmentKind,
    /// Monetary amount (2 decimal places, always positive; the kind
    /// decides the sign in payroll)
    pub amount: f64,
    pub reason: Option<String>,
    /// Unit count behind the amount (e.g. hookahs served), informational
    pub quantity: Option<i64>,
    pub created_at: i64,
}
