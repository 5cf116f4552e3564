//! Payroll assembly and the batch lifecycle against a real (in-memory)
//! database: live shortage aggregation, row freezing, and the one-way
//! finalize.

mod common;

use chrono::NaiveDate;
use common::*;
use office_server::db::repository::{
    RepoError, adjustment, count_session, debt, payment_batch, work_shift,
};
use office_server::payroll::service;
use shared::models::{BatchStatus, PayrollRequest};

fn millis(date: &str, hour: u32) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

fn request(participants: Vec<i64>, shortage_override: Option<f64>) -> PayrollRequest {
    PayrollRequest {
        period_start: "2025-07-01".to_string(),
        period_end: "2025-07-31".to_string(),
        participant_ids: participants,
        shortage_override,
    }
}

/// Catalog + staff + one month of activity: two 8-hour shifts at hourly
/// 200 for Aru, a debt of 3 × 50, a penalty of 100, and a finalized count
/// session missing 4 × 3.00 of Berry Punch.
async fn seed_month(pool: &sqlx::SqlitePool) {
    seed_category(pool, 1, "Drinks").await;
    seed_product(pool, 101, "Berry Punch", 1, 3.0, 10).await;
    seed_product(pool, 102, "Berry Fizz", 1, 3.0, 5).await;
    seed_employee(pool, 1, "Aru", "HOURLY", 200.0).await;
    seed_employee(pool, 2, "Marat", "DAILY", 8000.0).await;

    seed_shift(pool, 11, 1, "2025-07-10", millis("2025-07-10", 12), millis("2025-07-10", 20)).await;
    seed_shift(pool, 12, 1, "2025-07-11", millis("2025-07-11", 12), millis("2025-07-11", 20)).await;
    seed_shift(pool, 13, 2, "2025-07-12", millis("2025-07-12", 18), millis("2025-07-12", 21)).await;

    seed_debt(pool, 21, 1, 101, 3, 50.0, millis("2025-07-12", 15)).await;
    seed_adjustment(pool, 31, 11, 1, "PENALTY", 100.0).await;

    // Finalized count: Berry Punch short 4, Berry Fizz over 4 (unexplained)
    let session = count_session::create(pool, "Mid-July count", "2025-07-15")
        .await
        .unwrap();
    count_session::save_entry(pool, session.id, 101, 6).await.unwrap();
    count_session::save_entry(pool, session.id, 102, 9).await.unwrap();
    count_session::finalize(pool, session.id).await.unwrap();
}

#[tokio::test]
async fn report_rolls_up_shifts_debts_adjustments_and_live_shortage() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    let report = service::build_report(&pool, chrono_tz::UTC, &request(vec![1], None))
        .await
        .unwrap();

    assert_eq!(report.shortage_total, 12.0);
    assert!(!report.shortage_overridden);
    assert_eq!(report.rows.len(), 2);

    let aru = &report.rows[0];
    assert_eq!(aru.employee_id, 1);
    assert_eq!(aru.total_shifts, 2);
    assert_eq!(aru.total_hours, 16.0);
    assert_eq!(aru.gross, 3200.0);
    assert_eq!(aru.debt_amount, 150.0);
    assert_eq!(aru.penalties, 100.0);
    assert_eq!(aru.shortage_amount, 12.0); // sole participant
    assert_eq!(aru.net, 3200.0 - 150.0 - 12.0 - 100.0);

    // Daily-rate employee: flat rate for the 3-hour shift, no shortage
    let marat = &report.rows[1];
    assert_eq!(marat.gross, 8000.0);
    assert_eq!(marat.shortage_amount, 0.0);
}

#[tokio::test]
async fn per_entity_provider_reads_match_the_bulk_inputs() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    let shifts = work_shift::find_by_employee_in_range(&pool, 1, "2025-07-01", "2025-07-31")
        .await
        .unwrap();
    assert_eq!(shifts.len(), 2);
    assert!(shifts.iter().all(|s| s.employee_id == 1));

    let debts = debt::find_by_employee_in_range(
        &pool,
        1,
        millis("2025-07-01", 0),
        millis("2025-08-01", 0),
    )
    .await
    .unwrap();
    assert_eq!(debts.len(), 1);
    assert_eq!(debts[0].quantity, 3);

    let penalties = adjustment::find_by_shift(&pool, 11).await.unwrap();
    assert_eq!(penalties.len(), 1);
    assert_eq!(penalties[0].amount, 100.0);
}

#[tokio::test]
async fn draft_sessions_never_charge_staff() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    // A second, still-DRAFT count with a huge shortfall
    let draft = count_session::create(&pool, "Running count", "2025-07-20")
        .await
        .unwrap();
    count_session::save_entry(&pool, draft.id, 101, 0).await.unwrap();

    let report = service::build_report(&pool, chrono_tz::UTC, &request(vec![1], None))
        .await
        .unwrap();
    // Only the finalized session's 12.00 counts
    assert_eq!(report.shortage_total, 12.0);
}

#[tokio::test]
async fn override_replaces_the_live_figure() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    let report = service::build_report(&pool, chrono_tz::UTC, &request(vec![1], Some(500.0)))
        .await
        .unwrap();

    assert!(report.shortage_overridden);
    assert_eq!(report.shortage_total, 500.0);
    assert_eq!(report.rows[0].shortage_amount, 500.0);
}

#[tokio::test]
async fn batch_freezes_rows_against_later_source_edits() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    let report = service::build_report(&pool, chrono_tz::UTC, &request(vec![1], None))
        .await
        .unwrap();
    let batch = payment_batch::create(&pool, &report).await.unwrap();
    assert_eq!(batch.status, BatchStatus::Draft);
    assert_eq!(batch.rows.len(), 2);
    let frozen_net = batch.rows[0].net;

    let finalized = payment_batch::finalize(&pool, batch.id).await.unwrap();
    assert_eq!(finalized.status, BatchStatus::Finalized);
    assert!(finalized.finalized_at.is_some());

    // Rewrite history: double the length of one of Aru's shifts
    sqlx::query("UPDATE work_shift SET ended_at = ended_at + 28800000 WHERE id = 11")
        .execute(&pool)
        .await
        .unwrap();

    // The finalized batch still carries the rows computed at creation
    let reloaded = payment_batch::find_by_id(&pool, batch.id).await.unwrap().unwrap();
    assert_eq!(reloaded.rows[0].net, frozen_net);
    assert_eq!(reloaded.rows[0].total_hours, 16.0);

    // A fresh computation naturally sees the edit
    let fresh = service::build_report(&pool, chrono_tz::UTC, &request(vec![1], None))
        .await
        .unwrap();
    assert_eq!(fresh.rows[0].total_hours, 24.0);
}

#[tokio::test]
async fn double_finalize_is_a_consistent_conflict() {
    let pool = setup_pool().await;
    seed_month(&pool).await;

    let report = service::build_report(&pool, chrono_tz::UTC, &request(vec![], None))
        .await
        .unwrap();
    let batch = payment_batch::create(&pool, &report).await.unwrap();
    payment_batch::finalize(&pool, batch.id).await.unwrap();

    let err = payment_batch::finalize(&pool, batch.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let err = payment_batch::finalize(&pool, 424242).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
