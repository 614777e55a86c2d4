//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::prompts::{
    build_benchmark_prompt, build_design_prompt, build_one_pager_prompt, build_script_prompt,
    build_structure_prompt,
};
use crate::analysis::tasks::AnalysisTask;
use crate::benchmark::checker::{gap_report, GapReport};
use crate::benchmark::registry::template_key;
use crate::errors::AppError;
use crate::llm_client::retry::NoticeLog;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub deck_text: String,
    /// Template key or label. Required for `benchmark`, ignored otherwise.
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub task: AnalysisTask,
    pub filename: String,
    pub markdown: String,
    pub model: String,
    /// Retry notices emitted while generating.
    pub notices: Vec<String>,
    /// Benchmark only: template name as reported, missing sections and coverage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/:task
pub async fn handle_analysis(
    State(state): State<AppState>,
    Path(task): Path<String>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = run_analysis(&state, &task, request).await?;
    Ok(Json(response))
}

/// POST /api/v1/analysis/:task/download
///
/// Same pipeline, but the artifact is returned as a markdown attachment.
pub async fn handle_analysis_download(
    State(state): State<AppState>,
    Path(task): Path<String>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let response = run_analysis(&state, &task, request).await?;
    let disposition = format!("attachment; filename=\"{}\"", response.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        response.markdown,
    )
        .into_response())
}

async fn run_analysis(
    state: &AppState,
    task_name: &str,
    request: AnalysisRequest,
) -> Result<AnalysisResponse, AppError> {
    let task = AnalysisTask::parse(task_name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown analysis task '{task_name}'")))?;

    if request.deck_text.trim().is_empty() {
        return Err(AppError::Validation("deck_text cannot be empty".to_string()));
    }
    let deck_text = &request.deck_text;

    let (prompt, benchmark) = match task {
        AnalysisTask::Structure => (build_structure_prompt(deck_text), None),
        AnalysisTask::Script => (build_script_prompt(deck_text), None),
        AnalysisTask::Design => (build_design_prompt(deck_text), None),
        AnalysisTask::OnePager => (build_one_pager_prompt(deck_text), None),
        AnalysisTask::Benchmark => {
            let template = request
                .template
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Validation("template is required for benchmark analysis".to_string())
                })?;
            let report = gap_report(deck_text, template);
            let prompt = build_benchmark_prompt(deck_text, &report.gaps, &report.template_name);
            (prompt, Some(report))
        }
    };

    let key = benchmark.as_ref().map(|r| {
        r.template_key
            .map(str::to_string)
            .unwrap_or_else(|| template_key(&r.template_name))
    });
    let filename = task.filename(key.as_deref());

    info!(
        task = task.label(),
        deck_chars = deck_text.chars().count(),
        prompt_chars = prompt.chars().count(),
        "generating analysis"
    );

    let notices = NoticeLog::default();
    let markdown = state
        .generator
        .generate(&prompt, &notices)
        .await
        .into_result()?;

    let (template, gaps, coverage) = match benchmark {
        Some(GapReport {
            template_name,
            gaps,
            coverage,
            ..
        }) => (Some(template_name), Some(gaps), Some(coverage)),
        None => (None, None, None),
    };

    Ok(AnalysisResponse {
        task,
        filename,
        markdown,
        model: state.generator.model_name().to_string(),
        notices: notices.into_notices(),
        template,
        gaps,
        coverage,
    })
}
