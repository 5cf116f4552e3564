//! Count Session Repository
//!
//! Persists physical inventory passes. Mutations are field-scoped so that
//! user entry saves and the background stock sync never clobber each
//! other: entry saves touch `actual_quantity`, the sync touches
//! `system_quantity`, replacement accepts touch `replacement_product_id`.
//! The session status gates every mutation — SAVED sessions are immutable.

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use shared::models::{CountEntry, CountSession, CountStatus};
use sqlx::SqlitePool;

const SESSION_SELECT: &str = "SELECT id, name, session_date, status, created_at, updated_at, saved_at FROM count_session";

const ENTRY_SELECT: &str = "SELECT session_id, product_id, system_quantity, actual_quantity, replacement_product_id, updated_at FROM count_entry";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CountSession>> {
    let sql = format!("{} WHERE id = ?", SESSION_SELECT);
    let session = sqlx::query_as::<_, CountSession>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    match session {
        Some(mut s) => {
            s.entries = find_entries(pool, id).await?;
            Ok(Some(s))
        }
        None => Ok(None),
    }
}

/// Session headers only (no entries), newest first.
pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<CountSession>> {
    let sql = format!(
        "{} ORDER BY session_date DESC, created_at DESC LIMIT ? OFFSET ?",
        SESSION_SELECT
    );
    let sessions = sqlx::query_as::<_, CountSession>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(sessions)
}

/// Entries in ascending product-id order — the natural iteration order of
/// the reconciliation pass.
pub async fn find_entries(pool: &SqlitePool, session_id: i64) -> RepoResult<Vec<CountEntry>> {
    let sql = format!("{} WHERE session_id = ? ORDER BY product_id", ENTRY_SELECT);
    let entries = sqlx::query_as::<_, CountEntry>(&sql)
        .bind(session_id)
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

/// Create a DRAFT session pre-seeded with one entry per active product,
/// snapshotting current catalog stock into `system_quantity`.
pub async fn create(pool: &SqlitePool, name: &str, session_date: &str) -> RepoResult<CountSession> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO count_session (id, name, session_date, status, created_at, updated_at) VALUES (?1, ?2, ?3, 'DRAFT', ?4, ?4)",
    )
    .bind(id)
    .bind(name)
    .bind(session_date)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO count_entry (session_id, product_id, system_quantity, updated_at) \
         SELECT ?1, id, system_stock, ?2 FROM product WHERE is_active = 1",
    )
    .bind(id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create count session".into()))
}

/// Load a DRAFT session or explain why the mutation is rejected.
async fn require_draft(pool: &SqlitePool, session_id: i64) -> RepoResult<CountSession> {
    let sql = format!("{} WHERE id = ?", SESSION_SELECT);
    let session = sqlx::query_as::<_, CountSession>(&sql)
        .bind(session_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Count session {session_id} not found")))?;
    if session.status != CountStatus::Draft {
        return Err(RepoError::Conflict(format!(
            "Count session {session_id} is already saved"
        )));
    }
    Ok(session)
}

/// Incremental per-product save: writes `actual_quantity` only, creating
/// the entry row if the product was added to the catalog after the session
/// was seeded. Last write wins on this field.
pub async fn save_entry(
    pool: &SqlitePool,
    session_id: i64,
    product_id: i64,
    actual_quantity: i64,
) -> RepoResult<CountEntry> {
    require_draft(pool, session_id).await?;

    let product_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await?;
    if product_exists == 0 {
        return Err(RepoError::NotFound(format!("Product {product_id} not found")));
    }

    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO count_entry (session_id, product_id, actual_quantity, updated_at) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(session_id, product_id) DO UPDATE SET actual_quantity = excluded.actual_quantity, updated_at = excluded.updated_at",
    )
    .bind(session_id)
    .bind(product_id)
    .bind(actual_quantity)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query("UPDATE count_session SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(session_id)
        .execute(pool)
        .await?;

    let sql = format!("{} WHERE session_id = ? AND product_id = ?", ENTRY_SELECT);
    sqlx::query_as::<_, CountEntry>(&sql)
        .bind(session_id)
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to save count entry".into()))
}

/// Accept (`Some`) or clear (`None`) a replacement pairing. Category and
/// self-reference validation happens in the reconciliation engine before
/// this write.
pub async fn apply_replacement(
    pool: &SqlitePool,
    session_id: i64,
    product_id: i64,
    replacement_product_id: Option<i64>,
) -> RepoResult<CountEntry> {
    require_draft(pool, session_id).await?;

    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE count_entry SET replacement_product_id = ?1, updated_at = ?2 WHERE session_id = ?3 AND product_id = ?4",
    )
    .bind(replacement_product_id)
    .bind(now)
    .bind(session_id)
    .bind(product_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {product_id} has no entry in count session {session_id}"
        )));
    }

    let sql = format!("{} WHERE session_id = ? AND product_id = ?", ENTRY_SELECT);
    sqlx::query_as::<_, CountEntry>(&sql)
        .bind(session_id)
        .bind(product_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to load count entry".into()))
}

/// Stock sync: overwrite `system_quantity` of existing entries from fresh
/// upstream numbers. No-op (Ok(0)) when the session is not DRAFT — the
/// sync loop uses that as its stop signal. Never touches `actual_quantity`
/// or `replacement_product_id`.
pub async fn sync_system_quantities(
    pool: &SqlitePool,
    session_id: i64,
    fresh_counts: &HashMap<i64, i64>,
) -> RepoResult<u64> {
    match require_draft(pool, session_id).await {
        Ok(_) => {}
        Err(RepoError::Conflict(_)) => return Ok(0),
        Err(e) => return Err(e),
    }

    let now = shared::util::now_millis();
    let mut touched = 0u64;
    for (product_id, qty) in fresh_counts {
        let result = sqlx::query(
            "UPDATE count_entry SET system_quantity = ?1, updated_at = ?2 WHERE session_id = ?3 AND product_id = ?4",
        )
        .bind(qty)
        .bind(now)
        .bind(session_id)
        .bind(product_id)
        .execute(pool)
        .await?;
        touched += result.rows_affected();
    }
    Ok(touched)
}

/// DRAFT → SAVED, one-way. Finalizing twice is a conflict.
pub async fn finalize(pool: &SqlitePool, session_id: i64) -> RepoResult<CountSession> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE count_session SET status = 'SAVED', saved_at = ?1, updated_at = ?1 WHERE id = ?2 AND status = 'DRAFT'",
    )
    .bind(now)
    .bind(session_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish "missing" from "already saved"
        return match find_by_id(pool, session_id).await? {
            Some(_) => Err(RepoError::Conflict(format!(
                "Count session {session_id} is already saved"
            ))),
            None => Err(RepoError::NotFound(format!(
                "Count session {session_id} not found"
            ))),
        };
    }

    find_by_id(pool, session_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Count session {session_id} not found")))
}

/// IDs of all DRAFT sessions — used to re-attach stock sync loops at
/// server startup.
pub async fn find_draft_ids(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM count_session WHERE status = 'DRAFT' ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// SAVED sessions dated inside the inclusive range, with entries — the
/// payroll engine sums their unexplained shortage values.
pub async fn find_saved_in_range(
    pool: &SqlitePool,
    start_date: &str,
    end_date: &str,
) -> RepoResult<Vec<CountSession>> {
    let sql = format!(
        "{} WHERE status = 'SAVED' AND session_date BETWEEN ? AND ? ORDER BY session_date",
        SESSION_SELECT
    );
    let mut sessions = sqlx::query_as::<_, CountSession>(&sql)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await?;
    for session in &mut sessions {
        session.entries = find_entries(pool, session.id).await?;
    }
    Ok(sessions)
}
