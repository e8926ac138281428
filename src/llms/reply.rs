//! Remote reply generation with fallback.
//!
//! [`ReplyGenerator::try_generate`] returns the typed outcome of the remote
//! call; [`ReplyGenerator::generate_reply`] always yields text, turning
//! every failure into a calm, human-readable message.

use std::sync::Arc;

use crate::llms::base_llm::ChatModel;
use crate::persona::Persona;
use crate::session::{Role, Turn};
use crate::utilities::errors::ReplyError;

/// Reply used when no remote credential is configured.
pub const UNCONFIGURED_REPLY: &str = "I hear you. Thank you for opening up. While my AI service isn't fully configured right now, I'm here to listen. What feels most present for you in this moment?";

/// Reply used when the remote call fails. Error detail may be appended.
pub const CONNECTION_TROUBLE_REPLY: &str = "Thank you for sharing. I'm having a little trouble connecting right now, but I'm here to listen. If it helps, we can take a slow breath together.";

/// Builds remote replies for a conversation.
#[derive(Debug, Clone)]
pub struct ReplyGenerator {
    model: Arc<dyn ChatModel>,
    persona: Persona,
    include_error_detail: bool,
}

impl ReplyGenerator {
    pub fn new(model: Arc<dyn ChatModel>, persona: Persona) -> Self {
        Self {
            model,
            persona,
            include_error_detail: true,
        }
    }

    /// Whether failure replies carry the underlying error text.
    pub fn with_error_detail(mut self, include: bool) -> Self {
        self.include_error_detail = include;
        self
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Call the remote model with `history`, whose last turn is the live message.
    pub async fn try_generate(&self, history: &[Turn]) -> Result<String, ReplyError> {
        if !self.model.is_configured() {
            return Err(ReplyError::NotConfigured);
        }
        let (last, seed) = history.split_last().ok_or(ReplyError::EmptyHistory)?;
        if last.role != Role::User {
            tracing::warn!("last turn is not from the user; sending it as the live message anyway");
        }

        tracing::debug!(
            provider = self.model.provider(),
            model = self.model.model(),
            seed_turns = seed.len(),
            "calling remote model"
        );
        self.model
            .send_message(self.persona.system_instruction(), seed, &last.content)
            .await
    }

    /// Reply text for `history`. Never fails.
    pub async fn generate_reply(&self, history: &[Turn]) -> String {
        match self.try_generate(history).await {
            Ok(text) => text,
            Err(err) => {
                if !matches!(err, ReplyError::NotConfigured) {
                    tracing::warn!(kind = err.kind(), error = %err, "remote reply failed");
                }
                self.fallback_for(&err)
            }
        }
    }

    /// Substitute text for a failed call.
    pub fn fallback_for(&self, err: &ReplyError) -> String {
        match err {
            ReplyError::NotConfigured => UNCONFIGURED_REPLY.to_string(),
            other if self.include_error_detail => {
                format!("{} ({})", CONNECTION_TROUBLE_REPLY, other)
            }
            _ => CONNECTION_TROUBLE_REPLY.to_string(),
        }
    }
}
