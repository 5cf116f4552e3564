//! Employee Repository

use super::RepoResult;
use shared::models::Employee;
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str = "SELECT id, display_name, pay_unit, pay_rate, is_active, created_at, updated_at FROM employee";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{} WHERE is_active = 1 ORDER BY display_name", EMPLOYEE_SELECT);
    let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{} WHERE id = ?", EMPLOYEE_SELECT);
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All employees including inactive, id order — payroll input.
/// Inactive staff may still have shifts or debts inside an old period.
pub async fn find_all_for_payroll(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{} ORDER BY id", EMPLOYEE_SELECT);
    let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(rows)
}
