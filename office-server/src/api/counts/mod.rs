//! Count Session API 模块 (盘点)

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/counts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/entries/{product_id}", put(handler::save_entry))
        .route(
            "/{id}/entries/{product_id}/replacement",
            put(handler::apply_replacement),
        )
        .route("/{id}/variance", get(handler::variance))
        .route("/{id}/suggestions", get(handler::suggestions))
        .route("/{id}/shortage-value", get(handler::shortage_value))
        .route("/{id}/finalize", post(handler::finalize))
}
