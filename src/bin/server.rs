//! Mira HTTP server binary.
//!
//! Serves the chat page and the `/chat` endpoint.
//!
//! # Environment Variables
//!
//! - `SECRET_KEY` / `FLASK_SECRET_KEY` — cookie signing key (a development default is used if unset)
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY` — Gemini credential (fallback replies if unset)
//! - `GEMINI_MODEL` — model name (default: "gemini-2.5-flash")
//! - `HOST` / `PORT` — bind address (default: 0.0.0.0:5000)
//! - `SESSION_TTL_DAYS` — idle lifetime of a session (default: 7)
//! - `MIRA_PERSONA_FILE` — optional file replacing the built-in persona
//! - `RUST_LOG` — tracing filter (default: "info,mira=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::time::Duration;

use anyhow::Context;
use mira::server::{app_router, AppState};
use mira::utilities::config::AppConfig;
use mira::utilities::logger::init_logging;
use mira::SessionStore;

/// How often idle sessions are swept.
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set; using the development key");
    }
    if config.llm.api_key.is_none() {
        tracing::warn!("no Gemini API key found; replies will use the fallback message");
    }

    let state = AppState::new(&config).context("failed to build app state")?;

    let store = state.store.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, remaining = store.len(), "purged idle sessions");
            }
        }
    });

    let app = app_router(state);
    let bind_addr = config.bind_addr();

    tracing::info!(
        "{} starting on {} (model {})",
        config.persona.name(),
        bind_addr,
        config.llm.model_name
    );
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /        — chat page");
    tracing::info!("  POST /chat    — send a message");
    tracing::info!("  GET  /health  — liveness probe");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
