use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "deckiq-api"
    }))
}

/// GET /api/v1/backend
/// Reports the model selected at startup and the active retry settings.
pub async fn backend_handler(State(state): State<AppState>) -> Json<Value> {
    let policy = state.generator.policy();
    Json(json!({
        "model": state.generator.model_name(),
        "available_models": state.available_models,
        "max_retries": policy.max_retries,
        "max_prompt_chars": policy.max_prompt_chars,
        "retry_empty_response": policy.retry_empty_response
    }))
}
