//! Axum route handlers for the Mira HTTP server.
//!
//! # Routes
//!
//! - `GET  /`                 — Chat page; creates the session and marks it permanent
//! - `POST /chat`             — `{ "message": ... }` → `{ "reply": ..., "mood": ... }`
//! - `GET  /health`           — Returns `{"status": "ok", "service": "mira", ...}`
//! - `GET  /static/script.js` — Client script for the chat page

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use tera::{Context, Tera};
use tower_http::trace::TraceLayer;

use crate::chat::{ChatRequest, ChatService};
use crate::llms::base_llm::ChatModel;
use crate::llms::providers::GeminiCompletion;
use crate::llms::reply::ReplyGenerator;
use crate::session::{MemorySessionStore, SessionId, SessionSigner, SessionStore};
use crate::utilities::config::AppConfig;
use crate::utilities::errors::{ChatError, ConfigError};

/// Title shown on the chat page.
pub const APP_NAME: &str = "Mental Health Chatbot - Mira";

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const CLIENT_SCRIPT: &str = include_str!("../../static/script.js");

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    if let Err(e) = tera.add_raw_template("index.html", INDEX_TEMPLATE) {
        tracing::error!("failed to parse index template: {}", e);
    }
    tera
});

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Conversation pipeline.
    pub chat: ChatService,
    /// Session storage, shared with the chat pipeline.
    pub store: Arc<MemorySessionStore>,
    /// Cookie signer.
    pub signer: SessionSigner,
}

impl AppState {
    /// Build state with the Gemini provider described by `config`.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let model: Arc<dyn ChatModel> = Arc::new(GeminiCompletion::from_config(&config.llm));
        Self::with_model(config, model)
    }

    /// Build state around any chat model.
    pub fn with_model(config: &AppConfig, model: Arc<dyn ChatModel>) -> Result<Self, ConfigError> {
        let store = Arc::new(MemorySessionStore::new(config.session_ttl));
        let generator = ReplyGenerator::new(model, config.persona.clone())
            .with_error_detail(config.llm.fallback_error_detail);
        Ok(Self {
            chat: ChatService::new(store.clone(), generator),
            store,
            signer: SessionSigner::new(&config.secret_key)?,
        })
    }

    /// Session named by the request cookie, or a fresh id.
    fn session_for(&self, headers: &HeaderMap) -> (SessionId, bool) {
        match self.signer.session_from_headers(headers) {
            Some(id) => (id, false),
            None => (SessionId::generate(), true),
        }
    }

    /// `Set-Cookie` value for `id`, persistent only for permanent sessions.
    fn cookie_for(&self, id: &SessionId) -> String {
        let max_age = self.store.is_permanent(id).then(|| self.store.ttl());
        self.signer.set_cookie(id, max_age)
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .route("/static/script.js", get(script_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match self {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// GET / — render the chat page.
///
/// Ensures the session exists, is marked permanent and has a history slot.
async fn index_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session, _) = state.session_for(&headers);
    if state.store.ensure(&session, true) {
        tracing::info!(session = %session, "session created");
    }

    let mut context = Context::new();
    context.insert("app_name", APP_NAME);
    context.insert("assistant_name", state.chat.persona_name());

    match TEMPLATES.render("index.html", &context) {
        Ok(page) => (
            [(header::SET_COOKIE, state.cookie_for(&session))],
            Html(page),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to render index page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

/// POST /chat — run one message through the conversation pipeline.
///
/// Request:  `{ "message": string }` (anything else counts as an empty message)
/// Response: `200 { "reply": string, "mood": string }` or `400 { "error": "Empty message" }`
async fn chat_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let (session, is_new) = state.session_for(&headers);
    let request = ChatRequest::from_body(&body);

    match state.chat.handle(&session, &request.message).await {
        Ok(response) => {
            if is_new {
                tracing::info!(session = %session, "session created by chat request");
            }
            (
                [(header::SET_COOKIE, state.cookie_for(&session))],
                Json(response),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "mira",
    }))
}

/// GET /static/script.js — chat page client script.
async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
