/// LLM Client: the single point of entry for all generative-backend calls in DeckIQ.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers build prompts and hand them to `RetryingGenerator`; the generator talks to an
/// `LlmBackend`, and the backend adapter is the only code that knows about HTTP.
///
/// Startup goes through `connect`, which probes candidate models and returns a
/// `BackendHandle` owned by `main`. There is no process-wide client.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod gemini;
pub mod retry;
#[cfg(test)]
pub mod testing;

use gemini::GeminiClient;

/// Prompt used to check that a candidate model answers at all.
const PROBE_PROMPT: &str = "Respond with 'OK'";
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// Used for all analysis artifacts.
pub const ANALYSIS_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.7,
    max_output_tokens: 4000,
    top_p: Some(0.8),
    top_k: Some(40),
};

pub const PROBE_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.1,
    max_output_tokens: 10,
    top_p: None,
    top_k: None,
};

/// Structured failure classes. Adapters translate raw backend errors into one of these at the
/// boundary; the retry policy only ever dispatches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Quota,
    NotFound,
    Auth,
    Network,
    Unknown,
}

impl ErrorKind {
    /// Classifies free-form error text. Adapters use this only when the transport or status
    /// code did not already identify the kind. Marker order matters: quota wins over the rest.
    pub fn classify(message: &str) -> Self {
        let msg = message.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| msg.contains(m));

        if has(&["quota", "rate limit"]) {
            ErrorKind::Quota
        } else if has(&["404", "not found"]) {
            ErrorKind::NotFound
        } else if has(&["authentication", "invalid", "api key not valid"]) {
            ErrorKind::Auth
        } else if has(&["network", "connection"]) {
            ErrorKind::Network
        } else {
            ErrorKind::Unknown
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Builds an error whose kind is inferred from the message text.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::classify(&message),
            message,
        }
    }
}

/// The generative capability the core depends on.
/// Returns the response text, which may be empty; emptiness is the caller's policy decision.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No Gemini model answered the startup probe (tried: {tried})")]
    NoModelAvailable { tried: String },
}

/// Initialized backend, produced once at startup and passed explicitly to the generator.
#[derive(Clone)]
pub struct BackendHandle {
    pub backend: Arc<dyn LlmBackend>,
    pub model_name: String,
    /// Number of models the API listed at startup; `None` when listing failed.
    pub available_models: Option<usize>,
}

impl BackendHandle {
    pub fn new(backend: Arc<dyn LlmBackend>, model_name: impl Into<String>) -> Self {
        Self {
            backend,
            model_name: model_name.into(),
            available_models: None,
        }
    }
}

/// Lists available models, then probes each candidate in order and keeps the first that
/// answers. Listing failures are logged and ignored; probe failures move on to the next model.
pub async fn connect(
    api_base: &str,
    api_key: &str,
    candidates: &[String],
) -> Result<BackendHandle, LlmError> {
    let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;

    let available_models = match gemini::list_models(&http, api_base, api_key).await {
        Ok(models) => {
            info!(count = models.len(), "Connected to Gemini API");
            debug!(models = ?models, "available models");
            Some(models.len())
        }
        Err(e) => {
            warn!(error = %e, "Could not list Gemini models");
            None
        }
    };

    let probes = candidates
        .iter()
        .map(|model| {
            let client = GeminiClient::new(http.clone(), api_base, api_key, model);
            (model.clone(), Arc::new(client) as Arc<dyn LlmBackend>)
        })
        .collect();

    select_model(probes, available_models).await
}

/// Sends the probe prompt to each candidate in order. The first non-empty reply wins; errors
/// and blank replies move on to the next model.
pub async fn select_model(
    candidates: Vec<(String, Arc<dyn LlmBackend>)>,
    available_models: Option<usize>,
) -> Result<BackendHandle, LlmError> {
    let tried: Vec<String> = candidates.iter().map(|(model, _)| model.clone()).collect();

    for (model, backend) in candidates {
        match backend.complete(PROBE_PROMPT, &PROBE_CONFIG).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(model = %model, "Active Gemini model selected");
                let mut handle = BackendHandle::new(backend, model);
                handle.available_models = available_models;
                return Ok(handle);
            }
            Ok(_) => debug!(model = %model, "probe returned empty text, trying next model"),
            Err(e) => debug!(model = %model, kind = ?e.kind, error = %e, "probe failed, trying next model"),
        }
    }

    Err(LlmError::NoModelAvailable {
        tried: tried.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(result: Result<String, BackendError>) -> Arc<testing::ScriptedBackend> {
        Arc::new(testing::ScriptedBackend::always(result))
    }

    fn candidate(model: &str, backend: &Arc<testing::ScriptedBackend>) -> (String, Arc<dyn LlmBackend>) {
        (model.to_string(), backend.clone() as Arc<dyn LlmBackend>)
    }

    #[tokio::test]
    async fn test_select_model_falls_through_to_next_candidate() {
        let first = scripted(Err(BackendError::new(ErrorKind::NotFound, "404 model not found")));
        let second = scripted(Ok("OK".to_string()));
        let candidates = vec![
            candidate("gemini-2.5-flash", &first),
            candidate("gemini-2.0-flash", &second),
        ];

        let handle = select_model(candidates, Some(12)).await.unwrap();

        assert_eq!(handle.model_name, "gemini-2.0-flash");
        assert_eq!(handle.available_models, Some(12));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.prompts(), vec![PROBE_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_select_model_skips_blank_reply() {
        let blank = scripted(Ok("  \n".to_string()));
        let answering = scripted(Ok("OK".to_string()));
        let candidates = vec![
            candidate("gemini-2.5-flash", &blank),
            candidate("gemini-1.5-flash-002", &answering),
        ];

        let handle = select_model(candidates, None).await.unwrap();

        assert_eq!(handle.model_name, "gemini-1.5-flash-002");
        assert_eq!(handle.available_models, None);
    }

    #[tokio::test]
    async fn test_select_model_fails_when_no_candidate_answers() {
        let rejected = scripted(Err(BackendError::new(ErrorKind::Auth, "API key not valid")));
        let silent = scripted(Ok(String::new()));
        let candidates = vec![
            candidate("gemini-2.5-flash", &rejected),
            candidate("gemini-2.0-flash", &silent),
        ];

        match select_model(candidates, None).await {
            Err(LlmError::NoModelAvailable { tried }) => {
                assert_eq!(tried, "gemini-2.5-flash, gemini-2.0-flash");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(handle) => panic!("unexpected model selected: {}", handle.model_name),
        }
        assert_eq!(rejected.calls(), 1);
        assert_eq!(silent.calls(), 1);
    }

    #[test]
    fn test_classify_quota_markers() {
        assert_eq!(ErrorKind::classify("Quota exceeded for metric"), ErrorKind::Quota);
        assert_eq!(ErrorKind::classify("Rate limit hit"), ErrorKind::Quota);
    }

    #[test]
    fn test_classify_not_found_markers() {
        assert_eq!(ErrorKind::classify("404 models/x is not found"), ErrorKind::NotFound);
    }

    #[test]
    fn test_classify_auth_markers() {
        assert_eq!(ErrorKind::classify("invalid api key"), ErrorKind::Auth);
        assert_eq!(
            ErrorKind::classify("API key not valid. Please pass a valid API key."),
            ErrorKind::Auth
        );
        assert_eq!(ErrorKind::classify("Authentication failed"), ErrorKind::Auth);
    }

    #[test]
    fn test_classify_network_markers() {
        assert_eq!(ErrorKind::classify("connection reset by peer"), ErrorKind::Network);
        assert_eq!(ErrorKind::classify("Network unreachable"), ErrorKind::Network);
    }

    #[test]
    fn test_classify_precedence_quota_first() {
        // Contains both "quota" and "invalid"; quota is checked first.
        assert_eq!(
            ErrorKind::classify("invalid request: quota exhausted"),
            ErrorKind::Quota
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(ErrorKind::classify("the model is overloaded"), ErrorKind::Unknown);
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let json = serde_json::to_value(ANALYSIS_CONFIG).unwrap();
        assert_eq!(json["maxOutputTokens"], 4000);
        assert_eq!(json["topK"], 40);
        let probe = serde_json::to_value(PROBE_CONFIG).unwrap();
        assert!(probe.get("topP").is_none());
    }
}
