//! Chat-completion client
//!
//! Issues a single POST per generation with a bearer credential and JSON
//! body, then extracts the first choice's message text. There is no retry:
//! a failure is reported to the caller as-is.

pub mod auth;
pub mod error;
pub mod wire;

use reqwest::{header, Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
pub use auth::{ApiKey, DEFAULT_API_KEY_ENV};
pub use wire::{ChatMessage, ChatPayload, Role};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Immutable client settings, resolved once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Full URL of the chat-completion endpoint
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Environment variable holding the credential
    pub api_key_env: String,
    /// Overall request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token budget for full mode
    pub max_tokens: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 60,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl ClientSettings {
    /// Build the JSON body for a system/user message pair
    pub fn payload(&self, system: &str, user: &str, max_tokens: u32) -> ChatPayload {
        ChatPayload::new(&self.model, system, user, self.temperature, max_tokens)
    }
}

/// Client for a single chat-completion endpoint
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: ReqwestClient,
    settings: ClientSettings,
    api_key: ApiKey,
}

impl CompletionClient {
    /// Create a client with an explicit credential
    pub fn new(settings: ClientSettings, api_key: ApiKey) -> Result<Self> {
        reqwest::Url::parse(&settings.endpoint).map_err(|e| {
            Error::configuration(format!("Invalid endpoint '{}': {}", settings.endpoint, e))
        })?;

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    /// Create a client reading the credential from `settings.api_key_env`.
    ///
    /// Fails with a configuration error before any network activity when the
    /// variable is missing or blank.
    pub fn from_env(settings: ClientSettings) -> Result<Self> {
        let api_key = ApiKey::from_env(&settings.api_key_env)?;
        Self::new(settings, api_key)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Send one completion request and return the generated text
    #[instrument(skip(self, payload), fields(model = %payload.model, max_tokens = payload.max_tokens))]
    pub async fn complete(&self, payload: &ChatPayload) -> Result<String> {
        let timeout_secs = self.settings.timeout_secs;

        debug!(endpoint = %self.settings.endpoint, "Sending completion request");
        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(header::AUTHORIZATION, self.api_key.bearer())
            .json(payload)
            .send()
            .await
            .map_err(|e| error::transport_error(e, timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| error::transport_error(e, timeout_secs))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Completion endpoint returned an error");
            return Err(error::api_error(status.as_u16(), &body));
        }

        let parsed: wire::ChatResponse = serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            message: e.to_string(),
        })?;

        let content = parsed
            .into_first_content()
            .ok_or_else(|| Error::MalformedResponse {
                message: "response has no choices[0].message.content".to_string(),
            })?;

        debug!(bytes = content.len(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_groq_endpoint() {
        let settings = ClientSettings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout_secs, 60);
        assert_eq!(settings.max_tokens, 4096);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_endpoint_is_a_configuration_error() {
        let settings = ClientSettings {
            endpoint: "not a url".to_string(),
            ..ClientSettings::default()
        };
        let err = CompletionClient::new(settings, ApiKey::new("k").unwrap()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn payload_uses_configured_model_and_temperature() {
        let settings = ClientSettings {
            model: "llama-3.3-70b-versatile".to_string(),
            ..ClientSettings::default()
        };
        let payload = settings.payload("sys", "hello", 1024);
        assert_eq!(payload.model, "llama-3.3-70b-versatile");
        assert_eq!(payload.max_tokens, 1024);
        assert_eq!(payload.messages[1].content, "hello");
    }
}
