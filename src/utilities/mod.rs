//! Shared utilities: configuration, error types and logging setup.

pub mod config;
pub mod errors;
pub mod logger;

pub use config::{AppConfig, LlmConfig};
pub use errors::{ChatError, ConfigError, ReplyError};
