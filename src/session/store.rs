//! Keyed session storage.
//!
//! The chat handler only sees the [`SessionStore`] trait, so it can be
//! exercised without any web session layer. [`MemorySessionStore`] is the
//! process-local implementation used by the server.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::{ConversationHistory, SessionId, MAX_HISTORY_TURNS};

/// Storage interface for per-session conversation history.
///
/// Reads and writes are independent; two concurrent requests for the same
/// session race and the last `put` wins.
pub trait SessionStore: Send + Sync {
    /// History for `id`, or an empty history if the session is unknown or expired.
    fn get(&self, id: &SessionId) -> ConversationHistory;

    /// Persist `history` for `id`, keeping only the most recent turns.
    fn put(&self, id: &SessionId, history: ConversationHistory);

    /// Create the session if missing and optionally mark it permanent.
    ///
    /// Returns `true` when a new session was created.
    fn ensure(&self, id: &SessionId, permanent: bool) -> bool;

    /// Whether the session exists and is marked permanent.
    fn is_permanent(&self, id: &SessionId) -> bool;

    /// Drop every expired session. Returns how many were removed.
    fn purge_expired(&self) -> usize;
}

/// One stored session.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub history: ConversationHistory,
    pub permanent: bool,
    pub last_touched: DateTime<Utc>,
}

impl SessionRecord {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            history: ConversationHistory::new(),
            permanent: false,
            last_touched: now,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_touched > ttl
    }
}

/// In-process session store with sliding expiry.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of live records, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Remove every record not touched within the TTL as of `now`.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now, self.ttl));
        before - sessions.len()
    }

    fn get_at(&self, id: &SessionId, now: DateTime<Utc>) -> ConversationHistory {
        let mut sessions = self.sessions.write();
        let Some(record) = sessions.get_mut(id) else {
            return ConversationHistory::new();
        };
        if record.is_expired(now, self.ttl) {
            sessions.remove(id);
            tracing::debug!(session = %id, "session expired on read");
            return ConversationHistory::new();
        }
        record.last_touched = now;
        record.history.clone()
    }

    fn put_at(&self, id: &SessionId, mut history: ConversationHistory, now: DateTime<Utc>) {
        let dropped = history.truncate_to_recent(MAX_HISTORY_TURNS);
        if dropped > 0 {
            tracing::debug!(session = %id, dropped, "history truncated");
        }

        let mut sessions = self.sessions.write();
        let record = sessions.entry(*id).or_insert_with(|| SessionRecord::new(now));
        if record.is_expired(now, self.ttl) {
            *record = SessionRecord::new(now);
        }
        record.history = history;
        record.last_touched = now;
    }

    fn ensure_at(&self, id: &SessionId, permanent: bool, now: DateTime<Utc>) -> bool {
        let mut sessions = self.sessions.write();
        let mut created = false;
        let record = sessions.entry(*id).or_insert_with(|| {
            created = true;
            SessionRecord::new(now)
        });
        if !created && record.is_expired(now, self.ttl) {
            *record = SessionRecord::new(now);
            created = true;
        }
        record.permanent |= permanent;
        record.last_touched = now;
        created
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::days(crate::utilities::config::DEFAULT_SESSION_TTL_DAYS))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &SessionId) -> ConversationHistory {
        self.get_at(id, Utc::now())
    }

    fn put(&self, id: &SessionId, history: ConversationHistory) {
        self.put_at(id, history, Utc::now())
    }

    fn ensure(&self, id: &SessionId, permanent: bool) -> bool {
        self.ensure_at(id, permanent, Utc::now())
    }

    fn is_permanent(&self, id: &SessionId) -> bool {
        let now = Utc::now();
        self.sessions
            .read()
            .get(id)
            .map(|r| r.permanent && !r.is_expired(now, self.ttl))
            .unwrap_or(false)
    }

    fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }
}
