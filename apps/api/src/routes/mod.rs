pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::benchmark::handlers as benchmark;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/backend", get(health::backend_handler))
        // Deck upload
        .route(
            "/api/v1/deck/extract",
            post(extraction::handle_extract).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Templates and keyword benchmarking
        .route("/api/v1/templates", get(benchmark::handle_list_templates))
        .route("/api/v1/templates/:name", get(benchmark::handle_get_template))
        .route("/api/v1/benchmark/gaps", post(benchmark::handle_check_gaps))
        // LLM-backed artifacts
        .route("/api/v1/analysis/:task", post(analysis::handle_analysis))
        .route(
            "/api/v1/analysis/:task/download",
            post(analysis::handle_analysis_download),
        )
        .with_state(state)
}
