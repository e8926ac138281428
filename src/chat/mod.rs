//! Chat module — the conversation pipeline behind `POST /chat`.
//!
//! ```text
//! User message
//!   → trim / reject empty
//!   → detect mood (keyword lookup)
//!   → load session history, append user turn, bound to 10
//!   → remote reply (or fallback text)
//!   → append assistant turn, persist
//!   → { reply, mood }
//! ```

pub mod handler;

pub use handler::{ChatRequest, ChatResponse, ChatService};
