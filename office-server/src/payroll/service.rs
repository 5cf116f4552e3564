//! Payroll input assembly
//!
//! Loads the period's shifts, debts, adjustments and shortage total from
//! the repositories and hands them to the pure engine. The engine itself
//! performs no I/O, so the assembled inputs are the complete audit surface
//! of a computation.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{PayrollReport, PayrollRequest};
use sqlx::SqlitePool;

use super::{PayrollInputs, compute_payroll};
use crate::db::repository::{adjustment, count_session, debt, employee, product, work_shift};
use crate::money::to_decimal;
use crate::reconciliation;
use crate::utils::{AppResult, time};

/// Assemble inputs for the period and run one payroll computation.
pub async fn build_report(
    pool: &SqlitePool,
    tz: Tz,
    req: &PayrollRequest,
) -> AppResult<PayrollReport> {
    let (start_date, end_date) = time::parse_date_range(&req.period_start, &req.period_end)?;

    let shifts = work_shift::find_by_date_range(pool, &req.period_start, &req.period_end).await?;
    let debts = debt::find_in_range(
        pool,
        time::day_start_millis(start_date, tz),
        time::day_end_millis(end_date, tz),
    )
    .await?;
    let adjustments =
        adjustment::find_by_date_range(pool, &req.period_start, &req.period_end).await?;
    let employees = employee::find_all_for_payroll(pool).await?;

    // The shortage total is computed once and passed immutably into the
    // reduction — the override, when present, replaces the live figure
    // entirely (a manually audited number from the director).
    let (shortage_total, shortage_overridden) = match req.shortage_override {
        Some(value) => (to_decimal(value), true),
        None => (
            period_shortage_total(pool, &req.period_start, &req.period_end).await?,
            false,
        ),
    };

    let inputs = PayrollInputs {
        period_start: &req.period_start,
        period_end: &req.period_end,
        employees: &employees,
        shifts: &shifts,
        debts: &debts,
        adjustments: &adjustments,
        participant_ids: &req.participant_ids,
        shortage_total,
        shortage_overridden,
    };
    Ok(compute_payroll(&inputs))
}

/// Live unexplained shortage value for a period: the sum of
/// `compute_shortage_value` over SAVED count sessions dated inside it.
/// DRAFT sessions are still being entered and never charge staff.
pub async fn period_shortage_total(
    pool: &SqlitePool,
    start_date: &str,
    end_date: &str,
) -> AppResult<Decimal> {
    let products = product::find_catalog(pool).await?;
    let sessions = count_session::find_saved_in_range(pool, start_date, end_date).await?;

    let mut total = Decimal::ZERO;
    for session in &sessions {
        total += reconciliation::compute_shortage_value(&session.entries, &products);
    }
    Ok(total)
}
