//! Chat handler — one user message in, one reply and mood out.
//!
//! The pipeline per message:
//! 1. Validate (trimmed message must be non-empty)
//! 2. Load the session's history
//! 3. Classify mood (independent of history)
//! 4. Append the user turn and bound the history
//! 5. Generate the remote reply (fallback text on any failure)
//! 6. Append the assistant turn, bound again, persist

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llms::reply::ReplyGenerator;
use crate::mood::{detect_mood, MoodLabel};
use crate::session::{SessionId, SessionStore, Turn, MAX_HISTORY_TURNS};
use crate::utilities::errors::ChatError;

// ============================================================================
// Request / Response types
// ============================================================================

/// Incoming chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

impl ChatRequest {
    /// Parse a request body leniently.
    ///
    /// Bodies that are not JSON, or whose `message` is missing or not a
    /// string, yield an empty message.
    pub fn from_body(body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_default();
        Self { message }
    }
}

/// Chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Mira's reply text (possibly a fallback message).
    pub reply: String,
    /// Mood detected in the user's message.
    pub mood: MoodLabel,
}

// ============================================================================
// Service
// ============================================================================

/// Orchestrates mood detection, history and reply generation.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    generator: ReplyGenerator,
}

impl ChatService {
    pub fn new(store: Arc<dyn SessionStore>, generator: ReplyGenerator) -> Self {
        Self { store, generator }
    }

    /// Display name of the persona replying in this chat.
    pub fn persona_name(&self) -> &str {
        self.generator.persona().name()
    }

    /// Handle one message for `session`.
    ///
    /// An empty message is rejected without touching the session.
    pub async fn handle(&self, session: &SessionId, message: &str) -> Result<ChatResponse, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            tracing::debug!(session = %session, "rejected empty message");
            return Err(ChatError::EmptyMessage);
        }

        let mut history = self.store.get(session);
        let mood = detect_mood(message);
        tracing::debug!(session = %session, mood = %mood, prior_turns = history.len(), "classified");

        history.push(Turn::user(message));
        let dropped = history.truncate_to_recent(MAX_HISTORY_TURNS);
        if dropped > 0 {
            tracing::debug!(session = %session, dropped, "history truncated");
        }

        let reply = self.generator.generate_reply(history.turns()).await;

        history.push(Turn::assistant(reply.clone()));
        self.store.put(session, history);

        Ok(ChatResponse { reply, mood })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llms::base_llm::ChatModel;
    use crate::llms::reply::UNCONFIGURED_REPLY;
    use crate::persona::Persona;
    use crate::session::{MemorySessionStore, Role};
    use crate::utilities::errors::ReplyError;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Echoes the live message and remembers each history length it saw.
    #[derive(Debug, Default)]
    struct EchoModel {
        seen: Mutex<Vec<(usize, String)>>,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        fn model(&self) -> &str {
            "echo"
        }

        fn provider(&self) -> &str {
            "test"
        }

        async fn send_message(
            &self,
            _system_instruction: &str,
            seed: &[Turn],
            message: &str,
        ) -> Result<String, ReplyError> {
            self.seen.lock().push((seed.len() + 1, message.to_string()));
            Ok(format!("echo: {message}"))
        }
    }

    #[derive(Debug)]
    struct UnconfiguredModel;

    #[async_trait]
    impl ChatModel for UnconfiguredModel {
        fn model(&self) -> &str {
            "none"
        }

        fn provider(&self) -> &str {
            "test"
        }

        fn is_configured(&self) -> bool {
            false
        }

        async fn send_message(&self, _: &str, _: &[Turn], _: &str) -> Result<String, ReplyError> {
            Err(ReplyError::NotConfigured)
        }
    }

    fn service_with(model: Arc<dyn ChatModel>) -> (ChatService, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::default());
        let generator = ReplyGenerator::new(model, Persona::mira());
        (ChatService::new(store.clone(), generator), store)
    }

    #[tokio::test]
    async fn test_single_exchange_is_persisted() {
        let (service, store) = service_with(Arc::new(EchoModel::default()));
        let session = SessionId::generate();

        let response = service.handle(&session, "  I feel happy today  ").await.unwrap();

        assert_eq!(response.reply, "echo: I feel happy today");
        assert_eq!(response.mood, MoodLabel::Positive);
        let history = store.get(&session);
        assert_eq!(
            history.turns(),
            &[
                Turn::user("I feel happy today"),
                Turn::assistant("echo: I feel happy today"),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_message_leaves_history_untouched() {
        let (service, store) = service_with(Arc::new(EchoModel::default()));
        let session = SessionId::generate();
        service.handle(&session, "hello").await.unwrap();
        let before = store.get(&session);

        assert_eq!(service.handle(&session, "").await, Err(ChatError::EmptyMessage));
        assert_eq!(service.handle(&session, " \n\t ").await, Err(ChatError::EmptyMessage));

        assert_eq!(store.get(&session), before);
    }

    #[tokio::test]
    async fn test_empty_message_does_not_create_session() {
        let (service, store) = service_with(Arc::new(EchoModel::default()));
        service.handle(&SessionId::generate(), "   ").await.unwrap_err();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_six_exchanges_evict_the_first() {
        let model = Arc::new(EchoModel::default());
        let (service, store) = service_with(model.clone());
        let session = SessionId::generate();

        for i in 1..=6 {
            service.handle(&session, &format!("message {i}")).await.unwrap();
        }

        let history = store.get(&session);
        assert_eq!(history.len(), 10);
        assert_eq!(history.turns()[0], Turn::user("message 2"));
        assert_eq!(history.turns()[1], Turn::assistant("echo: message 2"));
        assert_eq!(history.last(), Some(&Turn::assistant("echo: message 6")));
        assert!(!history.turns().iter().any(|t| t.content.contains("message 1")));
        for pair in history.turns().chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
        }

        // The model never sees more than 10 turns, and the live message is last.
        let seen = model.seen.lock();
        let lengths: Vec<usize> = seen.iter().map(|(n, _)| *n).collect();
        assert_eq!(lengths, vec![1, 3, 5, 7, 9, 10]);
        assert_eq!(seen[5].1, "message 6");
    }

    #[tokio::test]
    async fn test_unconfigured_service_uses_canned_reply() {
        let (service, store) = service_with(Arc::new(UnconfiguredModel));
        let session = SessionId::generate();

        let response = service.handle(&session, "I feel hopeless").await.unwrap();

        assert_eq!(response.mood, MoodLabel::Negative);
        assert_eq!(response.reply, UNCONFIGURED_REPLY);
        assert_eq!(store.get(&session).last(), Some(&Turn::assistant(UNCONFIGURED_REPLY)));
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_history() {
        let (service, store) = service_with(Arc::new(EchoModel::default()));
        let a = SessionId::generate();
        let b = SessionId::generate();

        service.handle(&a, "first").await.unwrap();
        service.handle(&b, "second").await.unwrap();

        assert_eq!(store.get(&a).turns()[0].content, "first");
        assert_eq!(store.get(&b).turns()[0].content, "second");
        assert_eq!(store.get(&a).len(), 2);
    }

    #[test]
    fn test_request_parsing_is_lenient() {
        assert_eq!(ChatRequest::from_body(br#"{"message":"hi"}"#).message, "hi");
        assert_eq!(ChatRequest::from_body(br#"{"message":42}"#).message, "");
        assert_eq!(ChatRequest::from_body(br#"{}"#).message, "");
        assert_eq!(ChatRequest::from_body(b"not json").message, "");
        assert_eq!(ChatRequest::from_body(b"").message, "");
    }
}
