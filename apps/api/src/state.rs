use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::retry::RetryingGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Wraps the backend selected at startup. Every analysis call goes through it.
    pub generator: Arc<RetryingGenerator>,
    pub config: Config,
    /// Number of models reported by the listing call, if it succeeded.
    pub available_models: Option<usize>,
}

#[cfg(test)]
impl AppState {
    /// State backed by an in-memory backend and default settings.
    pub fn for_tests(backend: Arc<dyn crate::llm_client::LlmBackend>) -> Self {
        use crate::config::{DEFAULT_GEMINI_API_BASE, DEFAULT_MODELS};
        use crate::llm_client::BackendHandle;

        let config = Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            gemini_models: DEFAULT_MODELS.split(',').map(str::to_string).collect(),
            max_prompt_chars: 30_000,
            max_retries: 3,
            retry_base_delay_ms: 1_000,
            retry_empty_response: false,
            max_upload_bytes: 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        };
        let handle = BackendHandle::new(backend, "gemini-test");
        let generator = RetryingGenerator::new(handle, config.retry_policy());

        AppState {
            generator: Arc::new(generator),
            config,
            available_models: Some(1),
        }
    }
}
