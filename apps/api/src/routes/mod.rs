pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/exams/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/v1/exams/present", post(handlers::handle_present))
        .with_state(state)
}
