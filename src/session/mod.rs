//! Per-client conversation state.
//!
//! ```text
//! cookie "mira_session" ──verify──► SessionId ──► SessionStore ──► ConversationHistory
//! ```
//!
//! A [`ConversationHistory`] never holds more than [`MAX_HISTORY_TURNS`]
//! turns once persisted; truncation drops the oldest turns first.

pub mod cookie;
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use cookie::SessionSigner;
pub use store::{MemorySessionStore, SessionRecord, SessionStore};

/// Maximum number of turns kept per session (five exchanges).
pub const MAX_HISTORY_TURNS: usize = 10;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered turns, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop the oldest turns until at most `max` remain.
    ///
    /// Returns how many turns were dropped.
    pub fn truncate_to_recent(&mut self, max: usize) -> usize {
        let excess = self.turns.len().saturating_sub(max);
        if excess > 0 {
            self.turns.drain(..excess);
        }
        excess
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl From<Vec<Turn>> for ConversationHistory {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

/// Opaque identifier of one client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_most_recent_in_order() {
        let mut history: ConversationHistory =
            (0..13).map(|i| Turn::user(format!("m{i}"))).collect::<Vec<_>>().into();

        let dropped = history.truncate_to_recent(MAX_HISTORY_TURNS);

        assert_eq!(dropped, 3);
        assert_eq!(history.len(), 10);
        let contents: Vec<&str> = history.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["m3", "m4", "m5", "m6", "m7", "m8", "m9", "m10", "m11", "m12"]
        );
    }

    #[test]
    fn test_truncate_is_noop_when_short() {
        let mut history = ConversationHistory::new();
        history.push(Turn::user("hi"));
        assert_eq!(history.truncate_to_recent(MAX_HISTORY_TURNS), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_turn_wire_shape() {
        let json = serde_json::to_value(Turn::assistant("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hello"}));

        let history: ConversationHistory = vec![Turn::user("a")].into();
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json, serde_json::json!([{"role": "user", "content": "a"}]));
    }

    #[test]
    fn test_session_id_round_trip_through_text() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
        assert_eq!(SessionId::parse("not-a-uuid"), None);
    }
}
