//! Payroll API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::payroll::service;
use crate::utils::AppResult;
use crate::utils::validation::validate_money;
use shared::models::{PayrollReport, PayrollRequest};

/// POST /api/payroll/preview - 工资试算
///
/// Runs one payroll computation without persisting anything. The screens
/// call this while the director adjusts the participant set or the
/// shortage override; only creating a batch freezes a result.
pub async fn preview(
    State(state): State<ServerState>,
    Json(payload): Json<PayrollRequest>,
) -> AppResult<Json<PayrollReport>> {
    if let Some(value) = payload.shortage_override {
        validate_money(value, "shortage_override")?;
    }

    let report = service::build_report(&state.pool, state.config.timezone, &payload).await?;
    Ok(Json(report))
}
