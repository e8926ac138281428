//! # Mira
//!
//! A single-session empathetic chat companion. Each message is classified
//! for mood with a fixed keyword lookup, appended to a short per-session
//! history, and answered by a hosted LLM under a fixed persona. Remote
//! failures never break the conversation; they become gentle fallback replies.

pub mod chat;
pub mod llms;
pub mod mood;
pub mod persona;
pub mod server;
pub mod session;
pub mod utilities;

pub use chat::{ChatResponse, ChatService};
pub use llms::{ChatModel, GeminiCompletion, ReplyGenerator};
pub use mood::{detect_mood, MoodLabel};
pub use persona::Persona;
pub use session::{ConversationHistory, MemorySessionStore, Role, SessionId, SessionStore, Turn};
pub use utilities::AppConfig;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
