//! Retrying Generator: bounded retries with classified backoff around an `LlmBackend`.
//!
//! Policy per attempt (attempts are 0-based, `max_retries` attempts in total):
//! - `Quota`    → wait `base_delay * 2^attempt + U(0,1)s`, then retry
//! - `Network`  → wait `network_delay`, then retry
//! - `Unknown`  → wait `unknown_delay`, then retry
//! - `NotFound` / `Auth` → fail immediately
//!
//! The generator never returns an error: every call resolves to a `GenerationOutcome`.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::{BackendHandle, ErrorKind, GenerationConfig, LlmBackend, ANALYSIS_CONFIG};

/// Appended to prompts cut down to `max_prompt_chars`.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length]";

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub network_delay: Duration,
    pub unknown_delay: Duration,
    /// Prompt length cap, in characters.
    pub max_prompt_chars: usize,
    /// When false an empty response body is terminal.
    pub retry_empty_response: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            network_delay: Duration::from_secs(2),
            unknown_delay: Duration::from_secs(1),
            max_prompt_chars: 30_000,
            retry_empty_response: false,
        }
    }
}

/// Receives human-readable retry notices. The caller decides how to render them.
pub trait ProgressReporter: Send + Sync {
    fn notice(&self, message: &str);
}

impl<F> ProgressReporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notice(&self, message: &str) {
        self(message)
    }
}

/// Collects notices so an HTTP response can return them alongside the artifact.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<String>>,
}

impl NoticeLog {
    pub fn into_notices(self) -> Vec<String> {
        self.notices.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressReporter for NoticeLog {
    fn notice(&self, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(message.to_string());
        }
    }
}

/// Terminal generation failures, each rendered as a user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationFailure {
    #[error("API quota exceeded. Please try again later or check your API limits.")]
    QuotaExceeded,

    #[error("Model {model} not available. Please check your API configuration.")]
    ModelUnavailable { model: String },

    #[error("Invalid API key. Please check your Google Gemini API key.")]
    InvalidCredentials,

    #[error("Network connection failed. Please check your internet connection.")]
    NetworkFailure,

    #[error("No response generated. Please try again.")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Success(String),
    Failure(GenerationFailure),
}

impl GenerationOutcome {
    pub fn into_result(self) -> Result<String, GenerationFailure> {
        match self {
            GenerationOutcome::Success(text) => Ok(text),
            GenerationOutcome::Failure(failure) => Err(failure),
        }
    }
}

pub struct RetryingGenerator {
    backend: Arc<dyn LlmBackend>,
    model_name: String,
    policy: RetryPolicy,
    config: GenerationConfig,
}

impl RetryingGenerator {
    pub fn new(handle: BackendHandle, policy: RetryPolicy) -> Self {
        Self {
            backend: handle.backend,
            model_name: handle.model_name,
            policy,
            config: ANALYSIS_CONFIG,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn generate(&self, prompt: &str, reporter: &dyn ProgressReporter) -> GenerationOutcome {
        let prompt = truncate_prompt(prompt, self.policy.max_prompt_chars);
        let max_attempts = self.policy.max_retries.max(1);

        for attempt in 0..max_attempts {
            let is_last = attempt + 1 == max_attempts;
            let next = attempt + 2;

            let (delay, notice) = match self.backend.complete(&prompt, &self.config).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        model = %self.model_name,
                        attempt = attempt + 1,
                        chars = text.chars().count(),
                        "generation succeeded"
                    );
                    return GenerationOutcome::Success(text);
                }
                Ok(_) => {
                    if !self.policy.retry_empty_response || is_last {
                        warn!(model = %self.model_name, attempt = attempt + 1, "empty response");
                        return GenerationOutcome::Failure(GenerationFailure::EmptyResponse);
                    }
                    (
                        self.policy.unknown_delay,
                        format!("Empty response received. Retrying... (attempt {next} of {max_attempts})"),
                    )
                }
                Err(err) => {
                    warn!(
                        model = %self.model_name,
                        attempt = attempt + 1,
                        kind = ?err.kind,
                        error = %err,
                        "generation attempt failed"
                    );
                    match err.kind {
                        ErrorKind::NotFound => {
                            return GenerationOutcome::Failure(GenerationFailure::ModelUnavailable {
                                model: self.model_name.clone(),
                            });
                        }
                        ErrorKind::Auth => {
                            return GenerationOutcome::Failure(GenerationFailure::InvalidCredentials);
                        }
                        ErrorKind::Quota if is_last => {
                            return GenerationOutcome::Failure(GenerationFailure::QuotaExceeded);
                        }
                        ErrorKind::Network if is_last => {
                            return GenerationOutcome::Failure(GenerationFailure::NetworkFailure);
                        }
                        ErrorKind::Unknown if is_last => {
                            return GenerationOutcome::Failure(GenerationFailure::Other(err.message));
                        }
                        ErrorKind::Quota => {
                            let wait = self.quota_delay(attempt);
                            (
                                wait,
                                format!(
                                    "Rate limit reached. Waiting {:.1} seconds before retry (attempt {next} of {max_attempts})",
                                    wait.as_secs_f64()
                                ),
                            )
                        }
                        ErrorKind::Network => (
                            self.policy.network_delay,
                            format!("Network issue. Retrying... (attempt {next} of {max_attempts})"),
                        ),
                        ErrorKind::Unknown => (
                            self.policy.unknown_delay,
                            format!("Unexpected error. Retrying... (attempt {next} of {max_attempts})"),
                        ),
                    }
                }
            };

            warn!(model = %self.model_name, delay_ms = delay.as_millis() as u64, "{notice}");
            reporter.notice(&notice);
            tokio::time::sleep(delay).await;
        }

        GenerationOutcome::Failure(GenerationFailure::Other(
            "Failed after multiple attempts. Please try again later.".to_string(),
        ))
    }

    /// Exponential backoff with up to one second of jitter.
    fn quota_delay(&self, attempt: u32) -> Duration {
        let backoff = self.policy.base_delay.saturating_mul(1 << attempt.min(16));
        backoff + Duration::from_secs_f64(rand::random::<f64>())
    }
}

/// Cuts the prompt to `max_chars` characters and appends the marker; shorter prompts pass
/// through untouched.
pub fn truncate_prompt(prompt: &str, max_chars: usize) -> Cow<'_, str> {
    match prompt.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &prompt[..cut])),
        None => Cow::Borrowed(prompt),
    }
}
