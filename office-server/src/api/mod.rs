//! HTTP API
//!
//! Per-resource routers nested under `/api/...`, merged into one app.
//! Capability checks happen upstream of this service; handlers validate
//! inputs, call repositories/engines, and emit notifications.

pub mod batches;
pub mod counts;
pub mod employees;
pub mod health;
pub mod payroll;
pub mod products;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(employees::router())
        .merge(counts::router())
        .merge(payroll::router())
        .merge(batches::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
