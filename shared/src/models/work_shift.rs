//! Work Shift Model (排班记录)
//!
//! Worked shifts are owned by the scheduling side of the back office; the
//! payroll engine consumes them read-only.

use serde::{Deserialize, Serialize};

/// One worked shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftRecord {
    pub id: i64,
    pub employee_id: i64,
    /// Calendar date of the shift (YYYY-MM-DD, business timezone)
    pub shift_date: String,
    /// Shift start (Unix millis)
    pub started_at: i64,
    /// Shift end (Unix millis)
    pub ended_at: i64,
    /// Free-form type tag ("day", "evening", "night", ...)
    pub shift_type: String,
    pub created_at: i64,
}

impl ShiftRecord {
    /// Worked hours derived from the timestamp pair (never negative).
    pub fn worked_hours(&self) -> f64 {
        let millis = (self.ended_at - self.started_at).max(0);
        millis as f64 / 3_600_000.0
    }
}
