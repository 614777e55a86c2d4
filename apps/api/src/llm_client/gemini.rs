//! Gemini adapter: implements `LlmBackend` over the Generative Language REST API.
//!
//! All translation from HTTP status codes, API status strings, and transport failures into
//! `ErrorKind` happens here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BackendError, ErrorKind, GenerationConfig, LlmBackend};

const API_VERSION: &str = "v1beta";

pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_base: &str, api_key: &str, model: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/{API_VERSION}/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate. Empty when the model produced nothing.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

#[async_trait]
impl LlmBackend for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, BackendError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(model = %self.model, status = %status, "Gemini API returned an error");
            return Err(api_error(status, &text));
        }

        let parsed: GenerateResponse = response.json().await.map_err(transport_error)?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                model = %self.model,
                prompt_tokens = ?usage.prompt_token_count,
                output_tokens = ?usage.candidates_token_count,
                finish_reason = ?parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()),
                "Gemini call succeeded"
            );
        }

        Ok(parsed.text())
    }
}

/// Returns bare model ids (`models/gemini-2.0-flash` → `gemini-2.0-flash`).
pub async fn list_models(
    client: &Client,
    api_base: &str,
    api_key: &str,
) -> Result<Vec<String>, BackendError> {
    let url = format!("{}/{API_VERSION}/models", api_base.trim_end_matches('/'));
    let response = client
        .get(url)
        .header("x-goog-api-key", api_key)
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(api_error(status, &text));
    }

    let list: ModelList = response.json().await.map_err(transport_error)?;
    Ok(list
        .models
        .into_iter()
        .map(|m| bare_model_name(&m.name).to_string())
        .collect())
}

fn bare_model_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn transport_error(e: reqwest::Error) -> BackendError {
    let message = format!("Request to Gemini failed: {e}");
    if e.is_timeout() || e.is_connect() {
        BackendError::new(ErrorKind::Network, message)
    } else {
        BackendError::from_message(message)
    }
}

fn api_error(status: StatusCode, body: &str) -> BackendError {
    let (message, api_status) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.chars().take(200).collect(), None),
    };
    let kind = kind_for_status(status, api_status.as_deref(), &message);
    BackendError::new(kind, format!("Gemini API error {}: {message}", status.as_u16()))
}

fn kind_for_status(status: StatusCode, api_status: Option<&str>, message: &str) -> ErrorKind {
    match (status.as_u16(), api_status) {
        (429, _) | (_, Some("RESOURCE_EXHAUSTED")) => ErrorKind::Quota,
        (404, _) | (_, Some("NOT_FOUND")) => ErrorKind::NotFound,
        (401 | 403, _) | (_, Some("UNAUTHENTICATED" | "PERMISSION_DENIED")) => ErrorKind::Auth,
        _ => ErrorKind::classify(message),
    }
}
