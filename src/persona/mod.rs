//! Persona — the fixed system instruction handed to the remote model.
//!
//! There is exactly one persona per process. It is built once at startup
//! (either the built-in Mira prompt or the contents of a file) and shared
//! read-only afterwards.

pub mod mira_prompt;

use std::path::PathBuf;
use std::sync::Arc;

use crate::utilities::errors::ConfigError;

pub use mira_prompt::MIRA_SYSTEM_PROMPT;

/// Display name of the built-in persona.
pub const MIRA_NAME: &str = "Mira";

/// Immutable persona configuration.
///
/// Cloning is cheap; the prompt text is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    name: String,
    system_instruction: Arc<str>,
}

impl Persona {
    /// Create a persona from a name and system instruction.
    pub fn new(name: impl Into<String>, system_instruction: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            system_instruction: system_instruction.into(),
        }
    }

    /// The built-in Mira persona.
    pub fn mira() -> Self {
        Self::new(MIRA_NAME, MIRA_SYSTEM_PROMPT)
    }

    /// Load the system instruction from a text file, keeping the Mira name.
    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self::new(MIRA_NAME, text.trim()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::mira()
    }
}
