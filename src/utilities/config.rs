//! Process configuration.
//!
//! Everything is read from environment variables. [`AppConfig::from_lookup`]
//! takes an arbitrary lookup so tests never touch the real environment.

use std::path::PathBuf;

use crate::persona::Persona;
use crate::utilities::errors::ConfigError;

/// Default session signing secret. Only suitable for local development.
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-me";

/// Default hosted model.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";

/// Default Generative Language API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default sliding session lifetime.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Settings for the remote model.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Credential for the remote service. `None` puts the service in fallback mode.
    pub api_key: Option<String>,
    /// Which hosted model to target.
    pub model_name: String,
    /// Base URL of the API.
    pub api_base: String,
    /// Whether remote error details are appended to the fallback reply.
    pub fallback_error_detail: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            fallback_error_detail: true,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret used to sign session cookies.
    pub secret_key: String,
    /// Remote model settings.
    pub llm: LlmConfig,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Sliding session lifetime.
    pub session_ttl: chrono::Duration,
    /// Persona handed to the remote model as its system instruction.
    pub persona: Persona,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            llm: LlmConfig::default(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            session_ttl: chrono::Duration::days(DEFAULT_SESSION_TTL_DAYS),
            persona: Persona::mira(),
        }
    }
}

impl AppConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => parse_value::<u16>("PORT", &raw)?,
            None => defaults.port,
        };

        let session_ttl = match get("SESSION_TTL_DAYS") {
            Some(raw) => {
                let days = parse_value::<i64>("SESSION_TTL_DAYS", &raw)?;
                if days <= 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "SESSION_TTL_DAYS".into(),
                        value: raw,
                    });
                }
                chrono::Duration::days(days)
            }
            None => defaults.session_ttl,
        };

        let fallback_error_detail = match get("MIRA_FALLBACK_ERROR_DETAIL") {
            Some(raw) => parse_bool("MIRA_FALLBACK_ERROR_DETAIL", &raw)?,
            None => defaults.llm.fallback_error_detail,
        };

        let persona = match get("MIRA_PERSONA_FILE") {
            Some(path) => Persona::from_file(PathBuf::from(path))?,
            None => defaults.persona,
        };

        Ok(Self {
            secret_key: get("SECRET_KEY")
                .or_else(|| get("FLASK_SECRET_KEY"))
                .unwrap_or(defaults.secret_key),
            llm: LlmConfig {
                api_key: get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
                model_name: get("GEMINI_MODEL").unwrap_or(defaults.llm.model_name),
                api_base: get("GEMINI_API_BASE").unwrap_or(defaults.llm.api_base),
                fallback_error_detail,
            },
            host: get("HOST").unwrap_or(defaults.host),
            port,
            session_ttl,
            persona,
        })
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the insecure development secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.llm.model_name, "gemini-2.5-flash");
        assert!(config.llm.api_key.is_none());
        assert!(config.uses_default_secret());
        assert_eq!(config.session_ttl, chrono::Duration::days(7));
        assert!(config.llm.fallback_error_detail);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("GOOGLE_API_KEY", "key-1"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("PORT", "8081"),
            ("SESSION_TTL_DAYS", "2"),
            ("MIRA_FALLBACK_ERROR_DETAIL", "off"),
        ]))
        .unwrap();
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.llm.api_key.as_deref(), Some("key-1"));
        assert_eq!(config.llm.model_name, "gemini-2.0-flash");
        assert_eq!(config.port, 8081);
        assert_eq!(config.session_ttl, chrono::Duration::days(2));
        assert!(!config.llm.fallback_error_detail);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_gemini_api_key_is_secondary() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "key-2")])).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("key-2"));

        let config = AppConfig::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "key-1"),
            ("GEMINI_API_KEY", "key-2"),
        ]))
        .unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("key-1"));
    }

    #[test]
    fn test_flask_secret_key_is_secondary() {
        let config = AppConfig::from_lookup(lookup(&[("FLASK_SECRET_KEY", "flask-s3cret")])).unwrap();
        assert_eq!(config.secret_key, "flask-s3cret");
        assert!(!config.uses_default_secret());

        let config = AppConfig::from_lookup(lookup(&[
            ("SECRET_KEY", "primary"),
            ("FLASK_SECRET_KEY", "flask-s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.secret_key, "primary");
    }

    #[test]
    fn test_blank_api_key_means_unconfigured() {
        let config = AppConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "   ")])).unwrap();
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("SESSION_TTL_DAYS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_persona_file_overrides_prompt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "You are a patient listener.").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = AppConfig::from_lookup(lookup(&[("MIRA_PERSONA_FILE", path.as_str())])).unwrap();
        assert_eq!(config.persona.system_instruction(), "You are a patient listener.");
    }

    #[test]
    fn test_missing_persona_file_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("MIRA_PERSONA_FILE", "/no/such/persona.txt")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
