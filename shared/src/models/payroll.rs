//! Payroll Models
//!
//! A payroll row is derived, never persisted on its own — only a payment
//! batch freezes rows into storage. `net` may legitimately go negative and
//! is never clamped.

use serde::{Deserialize, Serialize};

/// One employee's payroll line for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PayrollRow {
    pub employee_id: i64,
    pub employee_name: String,
    /// Total worked hours in range (2 decimal places)
    pub total_hours: f64,
    pub total_shifts: i64,
    /// Earnings before deductions
    pub gross: f64,
    /// Σ quantity × unit_price over the employee's debts in range
    pub debt_amount: f64,
    /// This employee's share of the period's unexplained shortage
    pub shortage_amount: f64,
    pub penalties: f64,
    pub bonuses: f64,
    pub commission: f64,
    /// gross − debt − shortage − penalties + bonuses + commission
    pub net: f64,
    /// Inline configuration problem (e.g. missing pay rate); the row is
    /// still present so one misconfigured employee never blocks the rest
    pub issue: Option<String>,
}

/// Full payroll computation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollReport {
    pub period_start: String,
    pub period_end: String,
    pub rows: Vec<PayrollRow>,
    pub total_net: f64,
    /// The unexplained shortage total that was allocated across
    /// participants (computed live or supplied as an override)
    pub shortage_total: f64,
    pub shortage_overridden: bool,
}

/// Payroll computation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Inclusive period start (YYYY-MM-DD)
    pub period_start: String,
    /// Inclusive period end (YYYY-MM-DD)
    pub period_end: String,
    /// Employees absorbing the period's unexplained shortage value.
    /// Empty set = nobody is charged (zero share, never an error).
    #[serde(default)]
    pub participant_ids: Vec<i64>,
    /// Manually audited shortage total replacing the live reconciliation
    /// figure when present
    pub shortage_override: Option<f64>,
}
