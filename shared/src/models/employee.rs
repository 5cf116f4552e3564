//! Employee Model (员工)

use serde::{Deserialize, Serialize};

/// Pay unit — how an employee's shift earnings are computed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PayUnit {
    /// hours worked × pay_rate
    Hourly,
    /// flat pay_rate per shift, regardless of hours logged
    Daily,
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub display_name: String,
    pub pay_unit: PayUnit,
    /// Hourly or per-shift rate depending on `pay_unit`.
    /// A non-positive rate means the employee is not configured for
    /// payroll yet; rows for such employees carry an inline issue.
    pub pay_rate: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
