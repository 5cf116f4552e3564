//! Product API Handlers
//!
//! The catalog is owned by the POS; these endpoints are a read-only view
//! for the reconciliation screens.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{AppError, AppResult};
use shared::models::ProductWithCategory;

/// GET /api/products - 获取货品列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个货品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductWithCategory>> {
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}
