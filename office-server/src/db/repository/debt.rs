//! Debt Repository
//!
//! Staff product debts, read-only payroll input.

use super::RepoResult;
use shared::models::DebtRecord;
use sqlx::SqlitePool;

const DEBT_SELECT: &str = "SELECT id, employee_id, product_id, quantity, unit_price, incurred_at, note FROM debt";

/// Debts incurred inside `[start_millis, end_millis)`.
pub async fn find_in_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<DebtRecord>> {
    let sql = format!(
        "{} WHERE incurred_at >= ? AND incurred_at < ? ORDER BY employee_id, incurred_at",
        DEBT_SELECT
    );
    let rows = sqlx::query_as::<_, DebtRecord>(&sql)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_employee_in_range(
    pool: &SqlitePool,
    employee_id: i64,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<DebtRecord>> {
    let sql = format!(
        "{} WHERE employee_id = ? AND incurred_at >= ? AND incurred_at < ? ORDER BY incurred_at",
        DEBT_SELECT
    );
    let rows = sqlx::query_as::<_, DebtRecord>(&sql)
        .bind(employee_id)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
