//! Google Gemini chat provider.
//!
//! Talks to the Generative Language REST API (`generateContent`). The seed
//! history and the live message are sent together as `contents`; the
//! persona goes in `systemInstruction`.
//!
//! # Authentication
//!
//! API key sent in the `x-goog-api-key` header, never in the URL.
//!
//! # Note
//!
//! One attempt per call. The `reqwest` client keeps its default timeout
//! (none), so a hung upstream blocks only the request that made the call.

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::ChatModel;
use crate::session::{Role, Turn};
use crate::utilities::config::LlmConfig;
use crate::utilities::errors::ReplyError;

/// Upper bound on how much of an error body is kept for messages.
const MAX_ERROR_BODY: usize = 500;

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiCompletion {
    model: String,
    api_key: Option<String>,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiCompletion {
    /// Create a provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Gemini model name (e.g., "gemini-2.5-flash").
    /// * `api_key` - Credential; `None` leaves the provider unconfigured.
    /// * `api_base` - API root, without a trailing path.
    pub fn new(model: impl Into<String>, api_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            config.model_name.clone(),
            config.api_key.clone(),
            config.api_base.clone(),
        )
    }

    fn api_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Map a turn's role onto Gemini's two chat roles.
    fn gemini_role(role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }

    /// Build the request body.
    pub fn build_request_body(system_instruction: &str, seed: &[Turn], message: &str) -> Value {
        let mut contents: Vec<Value> = seed
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": Self::gemini_role(turn.role),
                    "parts": [{ "text": turn.content }],
                })
            })
            .collect();
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": message }],
        }));

        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": contents,
        })
    }

    /// Extract the reply text from a response body.
    pub fn parse_response(response: &Value) -> Result<String, ReplyError> {
        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown Gemini API error");
            return Err(ReplyError::Malformed(format!("Gemini API error: {}", msg)));
        }

        let parts = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| ReplyError::Malformed("no candidate content in Gemini response".into()))?;

        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();
        if texts.is_empty() {
            return Err(ReplyError::Malformed("no text parts in Gemini response".into()));
        }

        Ok(texts.concat().trim().to_string())
    }
}

#[async_trait]
impl ChatModel for GeminiCompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_message(
        &self,
        system_instruction: &str,
        seed: &[Turn],
        message: &str,
    ) -> Result<String, ReplyError> {
        let api_key = self.api_key.as_deref().ok_or(ReplyError::NotConfigured)?;

        log::debug!(
            "GeminiCompletion.send_message: model={}, seed_turns={}",
            self.model,
            seed.len(),
        );

        let body = Self::build_request_body(system_instruction, seed, message);
        let response = self
            .client
            .post(self.api_endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            log::warn!("Gemini API returned {}", status);
            return Err(ReplyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ReplyError::Malformed(format!("failed to parse Gemini response: {}", e)))?;

        Self::parse_response(&json)
    }
}
