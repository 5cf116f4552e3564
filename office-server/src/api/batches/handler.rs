//! Payment Batch API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::payment_batch;
use crate::payroll::service;
use crate::utils::validation::validate_money;
use crate::utils::{AppError, AppResult};
use shared::models::{PaymentBatch, PaymentBatchCreate, PayrollRequest};

const RESOURCE: &str = "payment_batch";

/// Query params for listing batches
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/batches - 获取批次列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PaymentBatch>>> {
    let batches = payment_batch::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(batches))
}

/// GET /api/batches/:id - 获取单个批次 (含工资行)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentBatch>> {
    let batch = payment_batch::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment batch {} not found", id)))?;
    Ok(Json(batch))
}

/// POST /api/batches - 创建批次 (DRAFT)
///
/// Runs the payroll computation once and stores the resulting rows
/// verbatim; later edits to shifts or debts never leak into the batch.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentBatchCreate>,
) -> AppResult<Json<PaymentBatch>> {
    if let Some(value) = payload.shortage_override {
        validate_money(value, "shortage_override")?;
    }

    let request = PayrollRequest {
        period_start: payload.period_start,
        period_end: payload.period_end,
        participant_ids: payload.participant_ids,
        shortage_override: payload.shortage_override,
    };
    let report = service::build_report(&state.pool, state.config.timezone, &request).await?;

    let batch = payment_batch::create(&state.pool, &report).await?;

    let id = batch.id.to_string();
    state.notify(RESOURCE, "created", &id, Some(&batch));

    Ok(Json(batch))
}

/// POST /api/batches/:id/finalize - 定稿批次 (DRAFT → FINALIZED)
///
/// No recomputation happens here — finalize freezes whatever was computed
/// at creation. Finalizing twice is a consistent conflict error.
pub async fn finalize(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentBatch>> {
    let batch = payment_batch::finalize(&state.pool, id).await?;

    let id_str = batch.id.to_string();
    state.notify(
        RESOURCE,
        "finalized",
        &id_str,
        Some(&serde_json::json!({
            "period_start": batch.period_start,
            "period_end": batch.period_end,
            "total_net": batch.total_net,
        })),
    );

    Ok(Json(batch))
}
