//! Base trait for remote chat models.
//!
//! A call mirrors a stateful chat: the model is primed with the earlier
//! turns of the conversation and then sent one live user message.

use std::fmt;

use async_trait::async_trait;

use crate::session::Turn;
use crate::utilities::errors::ReplyError;

/// A hosted chat model.
///
/// Implementations return the raw reply text or a typed failure. They must
/// not substitute fallback text themselves; that is the job of
/// [`ReplyGenerator`](crate::llms::reply::ReplyGenerator).
#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    /// Model identifier.
    fn model(&self) -> &str;

    /// Provider name, used in logs.
    fn provider(&self) -> &str;

    /// Whether a credential is present. Unconfigured models are never called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Send `message` in a chat seeded with `seed`, under `system_instruction`.
    async fn send_message(
        &self,
        system_instruction: &str,
        seed: &[Turn],
        message: &str,
    ) -> Result<String, ReplyError>;
}
