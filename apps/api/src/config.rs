use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::retry::RetryPolicy;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODELS: &str = "gemini-2.5-flash,gemini-2.0-flash,gemini-1.5-flash-002";

/// Application configuration loaded from environment variables.
/// Startup fails if `GOOGLE_API_KEY` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_base: String,
    /// Candidate models, probed in order at startup.
    pub gemini_models: Vec<String>,
    pub max_prompt_chars: usize,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_empty_response: bool,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let models = optional_env("GEMINI_MODELS").unwrap_or_else(|| DEFAULT_MODELS.to_string());

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_models: parse_model_list(&models),
            max_prompt_chars: parse_env("DECKIQ_MAX_PROMPT_CHARS", 30_000)?,
            max_retries: parse_env("DECKIQ_MAX_RETRIES", 3)?,
            retry_base_delay_ms: parse_env("DECKIQ_RETRY_BASE_DELAY_MS", 1_000)?,
            retry_empty_response: parse_env("DECKIQ_RETRY_EMPTY_RESPONSE", false)?,
            max_upload_bytes: parse_env("DECKIQ_MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Retry settings for `RetryingGenerator`. Network and unknown waits keep their defaults.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_prompt_chars: self.max_prompt_chars,
            retry_empty_response: self.retry_empty_response,
            ..RetryPolicy::default()
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
