//! Remote chat model providers.
//!
//! Each provider implements [`ChatModel`](crate::llms::base_llm::ChatModel)
//! and owns its own request formatting and error mapping.
//!
//! | Provider | Module |
//! |----------|--------|
//! | Gemini | [`gemini`] |

pub mod gemini;

pub use gemini::GeminiCompletion;
