//! Count Session Model (盘点)
//!
//! One count session represents a single physical inventory pass: a named,
//! dated snapshot with one entry per counted product. Quantities are saved
//! incrementally as staff walk the shelves, so both quantity fields stay
//! `Option` until a value is entered — downstream variance math reads unset
//! as 0.

use serde::{Deserialize, Serialize};

/// Count session status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CountStatus {
    /// Open for entry saves and stock sync
    Draft,
    /// Finalized; immutable in this engine (re-opening is out of scope)
    Saved,
}

impl Default for CountStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Count session entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CountSession {
    pub id: i64,
    pub name: String,
    /// Effective date of the physical count (YYYY-MM-DD)
    pub session_date: String,
    pub status: CountStatus,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set when the session transitions to SAVED
    pub saved_at: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub entries: Vec<CountEntry>,
}

/// One counted product inside a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CountEntry {
    pub session_id: i64,
    pub product_id: i64,
    /// System-recorded quantity at count time (kept fresh by stock sync
    /// while the session is DRAFT). None = not yet snapshotted.
    pub system_quantity: Option<i64>,
    /// Physically counted quantity. None = not yet counted.
    pub actual_quantity: Option<i64>,
    /// Accepted replacement explaining this product's shortage.
    /// Must reference a product in the same category, never itself.
    pub replacement_product_id: Option<i64>,
    pub updated_at: i64,
}

/// Create count session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountSessionCreate {
    pub name: String,
    /// Effective date (YYYY-MM-DD); defaults to today in the business
    /// timezone when omitted
    pub session_date: Option<String>,
}

/// Incremental per-product entry save payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountEntrySave {
    pub actual_quantity: i64,
}

/// Accept or clear a replacement pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementApply {
    /// None clears the pairing and returns the product to ordinary
    /// shortage accounting
    pub replacement_product_id: Option<i64>,
}
