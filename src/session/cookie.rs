//! Signed session cookie.
//!
//! The cookie value is `<session uuid>.<hex HMAC-SHA256 of the uuid>`, keyed
//! with the service secret. Anything that fails verification is treated as
//! if no cookie had been sent.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::SessionId;
use crate::utilities::errors::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "mira_session";

/// Signs and verifies session cookies.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
            ConfigError::InvalidValue {
                key: "SECRET_KEY".into(),
                value: "<redacted>".into(),
            }
        })?;
        Ok(Self { mac })
    }

    fn signature(&self, id: &SessionId) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(id.to_string().as_bytes());
        mac
    }

    /// Cookie value for `id`.
    pub fn sign(&self, id: &SessionId) -> String {
        let tag = self.signature(id).finalize().into_bytes();
        format!("{}.{}", id, hex::encode(tag))
    }

    /// Recover the session id from a cookie value, if the signature holds.
    pub fn verify(&self, token: &str) -> Option<SessionId> {
        let (raw_id, raw_tag) = token.split_once('.')?;
        let id = SessionId::parse(raw_id)?;
        let tag = hex::decode(raw_tag).ok()?;
        self.signature(&id).verify_slice(&tag).ok()?;
        Some(id)
    }

    /// Session id carried by the request's `Cookie` headers, if valid.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == SESSION_COOKIE_NAME)
            .find_map(|(_, value)| self.verify(value))
    }

    /// `Set-Cookie` value for `id`.
    ///
    /// With `max_age` the cookie persists across browser restarts; without it
    /// the browser drops it at the end of its session.
    pub fn set_cookie(&self, id: &SessionId, max_age: Option<chrono::Duration>) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE_NAME,
            self.sign(id)
        );
        if let Some(age) = max_age {
            cookie.push_str(&format!("; Max-Age={}", age.num_seconds()));
        }
        cookie
    }
}
