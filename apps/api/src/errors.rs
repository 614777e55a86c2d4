use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::retry::GenerationFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationFailure),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::UnsupportedFormat(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT", msg.clone())
            }
            AppError::Generation(failure) => {
                tracing::error!("Generation failed: {failure}");
                let (status, code) = generation_status(failure);
                (status, code, failure.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn generation_status(failure: &GenerationFailure) -> (StatusCode, &'static str) {
    match failure {
        GenerationFailure::QuotaExceeded => (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED"),
        GenerationFailure::ModelUnavailable { .. } => (StatusCode::BAD_GATEWAY, "MODEL_UNAVAILABLE"),
        GenerationFailure::InvalidCredentials => (StatusCode::BAD_GATEWAY, "INVALID_CREDENTIALS"),
        GenerationFailure::NetworkFailure => (StatusCode::GATEWAY_TIMEOUT, "NETWORK_FAILURE"),
        GenerationFailure::EmptyResponse => (StatusCode::BAD_GATEWAY, "EMPTY_RESPONSE"),
        GenerationFailure::Other(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
    }
}
