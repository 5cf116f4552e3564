//! Payment Batch Model
//!
//! A payment batch wraps one payroll computation in a two-state workflow.
//! Rows are stored verbatim at creation; FINALIZED only flips the flag and
//! is terminal — corrections require a new batch.

use serde::{Deserialize, Serialize};

use super::payroll::PayrollRow;

/// Batch status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BatchStatus {
    Draft,
    Finalized,
}

/// Payment batch entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentBatch {
    pub id: i64,
    /// Inclusive period start (YYYY-MM-DD)
    pub period_start: String,
    /// Inclusive period end (YYYY-MM-DD)
    pub period_end: String,
    pub status: BatchStatus,
    /// Grand total of row nets, frozen at creation
    pub total_net: f64,
    /// Shortage total that was allocated when the rows were computed
    pub shortage_total: f64,
    pub created_at: i64,
    pub finalized_at: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub rows: Vec<PayrollRow>,
}

/// Create payment batch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBatchCreate {
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub participant_ids: Vec<i64>,
    pub shortage_override: Option<f64>,
}
