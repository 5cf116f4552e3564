//! Work Shift Repository
//!
//! Worked shifts are written by the scheduling screens; payroll only reads
//! them. Date strings compare lexicographically, so BETWEEN on
//! `YYYY-MM-DD` is a correct inclusive range.

use super::RepoResult;
use shared::models::ShiftRecord;
use sqlx::SqlitePool;

const SHIFT_SELECT: &str = "SELECT id, employee_id, shift_date, started_at, ended_at, shift_type, created_at FROM work_shift";

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_date: &str,
    end_date: &str,
) -> RepoResult<Vec<ShiftRecord>> {
    let sql = format!(
        "{} WHERE shift_date BETWEEN ? AND ? ORDER BY employee_id, started_at",
        SHIFT_SELECT
    );
    let rows = sqlx::query_as::<_, ShiftRecord>(&sql)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_employee_in_range(
    pool: &SqlitePool,
    employee_id: i64,
    start_date: &str,
    end_date: &str,
) -> RepoResult<Vec<ShiftRecord>> {
    let sql = format!(
        "{} WHERE employee_id = ? AND shift_date BETWEEN ? AND ? ORDER BY started_at",
        SHIFT_SELECT
    );
    let rows = sqlx::query_as::<_, ShiftRecord>(&sql)
        .bind(employee_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
