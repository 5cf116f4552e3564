//! Count Session API Handlers
//!
//! The variance/suggestions/shortage-value endpoints are pure projections
//! recomputed per request — cheap at count-session scale and safe to call
//! on every keystroke of the reconciliation screen.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{count_session, product};
use crate::money::to_f64;
use crate::reconciliation::{self, VarianceStatus};
use crate::utils::validation::{MAX_NAME_LEN, validate_quantity, validate_required_text};
use crate::utils::{AppError, AppResult, time};
use shared::models::{
    CountEntry, CountEntrySave, CountSession, CountSessionCreate, Product, ReplacementApply,
};

const RESOURCE: &str = "count_session";

// ============================================================================
// Response Types
// ============================================================================

/// One product's reconciliation line
#[derive(Debug, Clone, Serialize)]
pub struct VarianceRow {
    pub product_id: i64,
    pub product_name: String,
    pub category_id: i64,
    pub system_quantity: i64,
    pub actual_quantity: i64,
    pub diff: i64,
    pub status: VarianceStatus,
    pub replacement_product_id: Option<i64>,
}

/// One proposed replacement pairing
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionRow {
    pub shortage_product_id: i64,
    pub shortage_product_name: String,
    pub surplus_product_id: i64,
    pub surplus_product_name: String,
}

/// Aggregate shortage value of a session
#[derive(Debug, Clone, Serialize)]
pub struct ShortageValueResponse {
    pub session_id: i64,
    /// Σ (system − actual) × unit_price over unexplained shortages
    pub shortage_value: f64,
}

/// Query params for listing sessions
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

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/counts - 获取盘点列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CountSession>>> {
    let sessions = count_session::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(sessions))
}

/// GET /api/counts/:id - 获取单个盘点 (含条目)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CountSession>> {
    let session = count_session::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Count session {} not found", id)))?;
    Ok(Json(session))
}

/// POST /api/counts - 开始盘点
///
/// Seeds one entry per active product with the current catalog stock and
/// starts the upstream stock sync loop for the new DRAFT session.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CountSessionCreate>,
) -> AppResult<Json<CountSession>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let tz = state.config.timezone;
    let session_date = match payload.session_date {
        Some(date) => {
            let parsed = time::parse_date(&date)?;
            time::validate_not_future(parsed, tz)?;
            date
        }
        None => time::today(tz),
    };

    let session = count_session::create(&state.pool, payload.name.trim(), &session_date).await?;

    state.stock_sync.spawn_for_session(session.id);

    let id = session.id.to_string();
    state.notify(RESOURCE, "created", &id, Some(&session));

    Ok(Json(session))
}

/// PUT /api/counts/:id/entries/:product_id - 保存单品实盘数量
///
/// Field-scoped write: only `actual_quantity` is touched, so a concurrent
/// sync tick updating `system_quantity` can never clobber it.
pub async fn save_entry(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<CountEntrySave>,
) -> AppResult<Json<CountEntry>> {
    validate_quantity(payload.actual_quantity, "actual_quantity")?;

    let entry =
        count_session::save_entry(&state.pool, id, product_id, payload.actual_quantity).await?;
    Ok(Json(entry))
}

/// PUT /api/counts/:id/entries/:product_id/replacement - 接受/清除替代品
pub async fn apply_replacement(
    State(state): State<ServerState>,
    Path((id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<ReplacementApply>,
) -> AppResult<Json<CountEntry>> {
    // Same-category + non-self validation happens before any write; a
    // rejected pairing leaves the session untouched. Clearing needs none.
    if let Some(replacement_id) = payload.replacement_product_id {
        let products = product::find_catalog(&state.pool).await?;
        let target = find_product(&products, product_id)?;
        let replacement = find_product(&products, replacement_id)?;
        reconciliation::validate_replacement(target, replacement)?;
    }

    let entry = count_session::apply_replacement(
        &state.pool,
        id,
        product_id,
        payload.replacement_product_id,
    )
    .await?;
    Ok(Json(entry))
}

/// GET /api/counts/:id/variance - 实时差异表
pub async fn variance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<VarianceRow>>> {
    let (session, products) = load_session_and_catalog(&state, id).await?;
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let variance = reconciliation::compute_variance(&session.entries);
    let rows = session
        .entries
        .iter()
        .map(|entry| {
            let v = variance[&entry.product_id];
            let (name, category_id) = by_id
                .get(&entry.product_id)
                .map(|p| (p.name.clone(), p.category_id))
                .unwrap_or_default();
            VarianceRow {
                product_id: entry.product_id,
                product_name: name,
                category_id,
                system_quantity: entry.system_quantity.unwrap_or(0),
                actual_quantity: entry.actual_quantity.unwrap_or(0),
                diff: v.diff,
                status: v.status,
                replacement_product_id: entry.replacement_product_id,
            }
        })
        .collect();
    Ok(Json(rows))
}

/// GET /api/counts/:id/suggestions - 替代品建议
///
/// Advisory only — nothing is persisted until a pairing is accepted via
/// the replacement endpoint.
pub async fn suggestions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<SuggestionRow>>> {
    let (session, products) = load_session_and_catalog(&state, id).await?;
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let name_of = |product_id: i64| {
        by_id
            .get(&product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    };

    let suggestions = reconciliation::suggest_replacements(&session.entries, &products);
    let rows = suggestions
        .iter()
        .map(|(shortage_id, surplus_id)| SuggestionRow {
            shortage_product_id: *shortage_id,
            shortage_product_name: name_of(*shortage_id),
            surplus_product_id: *surplus_id,
            surplus_product_name: name_of(*surplus_id),
        })
        .collect();
    Ok(Json(rows))
}

/// GET /api/counts/:id/shortage-value - 未解释缺货金额
pub async fn shortage_value(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShortageValueResponse>> {
    let (session, products) = load_session_and_catalog(&state, id).await?;
    let value = reconciliation::compute_shortage_value(&session.entries, &products);
    Ok(Json(ShortageValueResponse {
        session_id: session.id,
        shortage_value: to_f64(value),
    }))
}

/// POST /api/counts/:id/finalize - 结束盘点 (DRAFT → SAVED)
///
/// One-way transition; the sync loop self-terminates on its next tick.
pub async fn finalize(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CountSession>> {
    let session = count_session::finalize(&state.pool, id).await?;

    let products = product::find_catalog(&state.pool).await?;
    let shortage = reconciliation::compute_shortage_value(&session.entries, &products);

    let id_str = session.id.to_string();
    state.notify(
        RESOURCE,
        "finalized",
        &id_str,
        Some(&serde_json::json!({
            "session_date": session.session_date,
            "shortage_value": to_f64(shortage),
        })),
    );

    Ok(Json(session))
}

// ============================================================================
// Helpers
// ============================================================================

fn find_product<'a>(products: &'a [Product], id: i64) -> AppResult<&'a Product> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))
}

async fn load_session_and_catalog(
    state: &ServerState,
    session_id: i64,
) -> AppResult<(CountSession, Vec<Product>)> {
    let session = count_session::find_by_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Count session {} not found", session_id)))?;
    let products = product::find_catalog(&state.pool).await?;
    Ok((session, products))
}
