//! HTTP server for the Mira chat companion.
//!
//! # Endpoints
//!
//! - `GET  /`      — Chat page (marks the session permanent)
//! - `POST /chat`  — Send a message, receive `{reply, mood}`
//! - `GET  /health` — Liveness probe

pub mod routes;

pub use routes::{app_router, AppState, APP_NAME};
