//! Repository Module
//!
//! CRUD and query operations as free async functions over `&SqlitePool`.
//! Date-string parameters are `YYYY-MM-DD` (lexicographic order == date
//! order); timestamps are Unix millis `i64`.

pub mod adjustment;
pub mod count_session;
pub mod debt;
pub mod employee;
pub mod payment_batch;
pub mod product;
pub mod work_shift;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
