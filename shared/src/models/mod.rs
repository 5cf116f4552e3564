//! Data models
//!
//! Shared between office-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod adjustment;
pub mod category;
pub mod count;
pub mod debt;
pub mod employee;
pub mod payment_batch;
pub mod payroll;
pub mod product;
pub mod work_shift;

// Re-exports
pub use adjustment::*;
pub use category::*;
pub use count::*;
pub use debt::*;
pub use employee::*;
pub use payment_batch::*;
pub use payroll::*;
pub use product::*;
pub use work_shift::*;
