//! Error types for Mira.
//!
//! Every failure the service can hit is one of these enums. Only
//! [`ChatError`] ever reaches an HTTP client as a non-200 response;
//! [`ReplyError`] is always converted into fallback text first.

use std::path::PathBuf;

use thiserror::Error;

/// Failures from the remote reply path.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// No API key is configured for the remote model.
    #[error("remote model is not configured")]
    NotConfigured,

    /// The generator was handed a history with no turns to reply to.
    #[error("conversation history is empty")]
    EmptyHistory,

    /// Network or connection level failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The remote service answered with a non-success status.
    #[error("remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ReplyError {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyError::NotConfigured => "not_configured",
            ReplyError::EmptyHistory => "empty_history",
            ReplyError::Transport(_) => "transport",
            ReplyError::Status { .. } => "status",
            ReplyError::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for ReplyError {
    /// The request URL is stripped; its text can reach the user.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            ReplyError::Malformed(err.to_string())
        } else {
            ReplyError::Transport(err.to_string())
        }
    }
}

/// Errors surfaced by the chat request handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// The message was empty or whitespace only.
    #[error("Empty message")]
    EmptyMessage,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// A file named by the configuration could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
