mod analysis;
mod benchmark;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::retry::RetryingGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DeckIQ API v{}", env!("CARGO_PKG_VERSION"));

    // Select a Gemini model; no answering candidate is fatal
    let handle = llm_client::connect(
        &config.gemini_api_base,
        &config.google_api_key,
        &config.gemini_models,
    )
    .await
    .context("Failed to initialize the Gemini backend")?;
    let available_models = handle.available_models;

    let policy = config.retry_policy();
    info!(
        model = %handle.model_name,
        max_retries = policy.max_retries,
        max_prompt_chars = policy.max_prompt_chars,
        "LLM backend ready"
    );
    let generator = Arc::new(RetryingGenerator::new(handle, policy));

    let state = AppState {
        generator,
        config: config.clone(),
        available_models,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
