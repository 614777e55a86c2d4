//! Axum route handlers for the Benchmark API.

use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::benchmark::checker::{gap_report, GapReport};
use crate::benchmark::registry::{all_templates, get_template, list_template_names, Template};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct GapCheckRequest {
    pub deck_text: String,
    pub template: String,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [Template]> {
    Json(all_templates())
}

/// GET /api/v1/templates/:name
pub async fn handle_get_template(Path(name): Path<String>) -> Result<Json<Template>, AppError> {
    get_template(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            let known: Vec<&str> = list_template_names().into_iter().collect();
            AppError::NotFound(format!(
                "Unknown template '{name}'. Available: {}",
                known.join(", ")
            ))
        })
}

/// POST /api/v1/benchmark/gaps
///
/// Keyword-only check, no model call. An unknown template yields an empty gap list.
pub async fn handle_check_gaps(
    Json(request): Json<GapCheckRequest>,
) -> Result<Json<GapReport>, AppError> {
    if request.template.trim().is_empty() {
        return Err(AppError::Validation("template cannot be empty".to_string()));
    }
    Ok(Json(gap_report(&request.deck_text, &request.template)))
}
