//! Remote model access.
//!
//! - [`base_llm`] - The [`ChatModel`] trait every provider implements
//! - [`providers`] - Concrete providers (Gemini)
//! - [`reply`] - [`ReplyGenerator`], which turns provider failures into fallback text

pub mod base_llm;
pub mod providers;
pub mod reply;

pub use base_llm::ChatModel;
pub use providers::GeminiCompletion;
pub use reply::{ReplyGenerator, CONNECTION_TROUBLE_REPLY, UNCONFIGURED_REPLY};
