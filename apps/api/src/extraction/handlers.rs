//! Axum route handler for deck uploads.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{
    deck_stats, extract_text, is_limited, DeckFormat, DeckStats, LIMITED_TEXT_WARNING,
    UNREADABLE_WARNING,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_name: Option<String>,
    pub format: DeckFormat,
    pub text: String,
    pub stats: DeckStats,
    pub limited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /api/v1/deck/extract
///
/// Expects a multipart body with a `file` field. The size cap is applied by the router.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let format = DeckFormat::detect(upload.content_type.as_deref(), upload.file_name.as_deref())
        .ok_or_else(|| {
            AppError::UnsupportedFormat("Only PDF and PPTX decks are supported".to_string())
        })?;

    let size = upload.data.len();
    let extracted = extract_text(upload.data, format, state.config.max_upload_bytes).await;
    let (text, warning) = match extracted {
        Ok(text) => {
            let warning = is_limited(&text).then(|| LIMITED_TEXT_WARNING.to_string());
            (text, warning)
        }
        Err(e) => {
            warn!(error = %e, format = ?format, "deck extraction failed");
            (String::new(), Some(format!("{UNREADABLE_WARNING} ({e})")))
        }
    };

    let stats = deck_stats(&text);
    info!(
        format = ?format,
        bytes = size,
        characters = stats.characters,
        words = stats.words,
        "deck extracted"
    );

    Ok(Json(ExtractResponse {
        file_name: upload.file_name,
        format,
        limited: is_limited(&text),
        text,
        stats,
        warning,
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(upload_error)?;
        return Ok(Some(Upload {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::extraction::pptx::tests::sample_pptx;
    use crate::extraction::PPTX_CONTENT_TYPE;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "deckiq-test-boundary";

    fn upload(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/deck/extract")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let backend = Arc::new(ScriptedBackend::always(Ok("unused".to_string())));
        let response = build_router(AppState::for_tests(backend))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_pptx_upload_returns_text_and_stats() {
        let (status, body) =
            send(upload("file", "deck.pptx", PPTX_CONTENT_TYPE, &sample_pptx())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], "pptx");
        assert_eq!(body["file_name"], "deck.pptx");
        assert!(body["text"].as_str().unwrap().starts_with("The Problem\n"));
        assert_eq!(body["stats"]["words"], 9);
        // Short sample deck.
        assert_eq!(body["limited"], true);
        assert!(body["warning"].as_str().unwrap().contains("paste"));
    }

    #[tokio::test]
    async fn test_unreadable_document_is_a_warning() {
        let (status, body) =
            send(upload("file", "deck.pdf", "application/pdf", b"garbage bytes")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "");
        assert_eq!(body["stats"]["characters"], 0);
        assert!(body["warning"].as_str().unwrap().starts_with("The document could not be read"));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_rejected() {
        let (status, body) = send(upload("file", "notes.txt", "text/plain", b"hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_rejected() {
        let (status, body) =
            send(upload("attachment", "deck.pdf", "application/pdf", b"%PDF")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
