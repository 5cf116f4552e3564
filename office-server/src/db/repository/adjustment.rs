//! Shift Adjustment Repository
//!
//! Penalty / bonus / hookah commission entries, read-only payroll input.
//! An adjustment belongs to the payroll period of the shift it is tied to,
//! hence the join on `work_shift.shift_date`.

use super::RepoResult;
use shared::models::ShiftAdjustment;
use sqlx::SqlitePool;

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_date: &str,
    end_date: &str,
) -> RepoResult<Vec<ShiftAdjustment>> {
    let rows = sqlx::query_as::<_, ShiftAdjustment>(
        "SELECT sa.id, sa.shift_id, sa.employee_id, sa.kind, sa.amount, sa.reason, sa.quantity, sa.created_at \
         FROM shift_adjustment sa \
         JOIN work_shift ws ON sa.shift_id = ws.id \
         WHERE ws.shift_date BETWEEN ? AND ? \
         ORDER BY sa.employee_id, sa.id",
    )
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_shift(pool: &SqlitePool, shift_id: i64) -> RepoResult<Vec<ShiftAdjustment>> {
    let rows = sqlx::query_as::<_, ShiftAdjustment>(
        "SELECT id, shift_id, employee_id, kind, amount, reason, quantity, created_at \
         FROM shift_adjustment WHERE shift_id = ? ORDER BY id",
    )
    .bind(shift_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
