//! Payment Batch Repository
//!
//! A batch freezes one payroll computation. Rows are inserted once at
//! creation and never updated; finalize only flips the status flag behind
//! a status guard, so a finalized batch can never change even if the
//! underlying shifts or debts do.

use super::{RepoError, RepoResult};
use shared::models::{BatchStatus, PaymentBatch, PayrollReport, PayrollRow};
use sqlx::SqlitePool;

const BATCH_SELECT: &str = "SELECT id, period_start, period_end, status, total_net, shortage_total, created_at, finalized_at FROM payment_batch";

const ROW_SELECT: &str = "SELECT employee_id, employee_name, total_hours, total_shifts, gross, debt_amount, shortage_amount, penalties, bonuses, commission, net, issue FROM payment_batch_row";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PaymentBatch>> {
    let sql = format!("{} WHERE id = ?", BATCH_SELECT);
    let batch = sqlx::query_as::<_, PaymentBatch>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match batch {
        Some(mut b) => {
            b.rows = find_rows(pool, id).await?;
            Ok(Some(b))
        }
        None => Ok(None),
    }
}

/// Batch headers only (no rows), newest first.
pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<PaymentBatch>> {
    let sql = format!(
        "{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        BATCH_SELECT
    );
    let batches = sqlx::query_as::<_, PaymentBatch>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(batches)
}

pub async fn find_rows(pool: &SqlitePool, batch_id: i64) -> RepoResult<Vec<PayrollRow>> {
    let sql = format!("{} WHERE batch_id = ? ORDER BY employee_id", ROW_SELECT);
    let rows = sqlx::query_as::<_, PayrollRow>(&sql)
        .bind(batch_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Store a computed payroll report verbatim as a new DRAFT batch.
pub async fn create(pool: &SqlitePool, report: &PayrollReport) -> RepoResult<PaymentBatch> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO payment_batch (id, period_start, period_end, status, total_net, shortage_total, created_at) VALUES (?1, ?2, ?3, 'DRAFT', ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&report.period_start)
    .bind(&report.period_end)
    .bind(report.total_net)
    .bind(report.shortage_total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for row in &report.rows {
        sqlx::query(
            "INSERT INTO payment_batch_row (batch_id, employee_id, employee_name, total_hours, total_shifts, gross, debt_amount, shortage_amount, penalties, bonuses, commission, net, issue) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(id)
        .bind(row.employee_id)
        .bind(&row.employee_name)
        .bind(row.total_hours)
        .bind(row.total_shifts)
        .bind(row.gross)
        .bind(row.debt_amount)
        .bind(row.shortage_amount)
        .bind(row.penalties)
        .bind(row.bonuses)
        .bind(row.commission)
        .bind(row.net)
        .bind(&row.issue)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment batch".into()))
}

/// DRAFT → FINALIZED. No recomputation, no re-read of live inputs — the
/// status flip snapshots whatever was stored at creation. Finalizing an
/// already-finalized batch is an explicit conflict.
pub async fn finalize(pool: &SqlitePool, id: i64) -> RepoResult<PaymentBatch> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE payment_batch SET status = 'FINALIZED', finalized_at = ?1 WHERE id = ?2 AND status = 'DRAFT'",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return match find_by_id(pool, id).await? {
            Some(b) if b.status == BatchStatus::Finalized => Err(RepoError::Conflict(format!(
                "Payment batch {id} is already finalized"
            ))),
            Some(_) => Err(RepoError::Database(format!(
                "Failed to finalize payment batch {id}"
            ))),
            None => Err(RepoError::NotFound(format!("Payment batch {id} not found"))),
        };
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payment batch {id} not found")))
}
