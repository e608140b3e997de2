/// Backend adapters: the only code in the crate that talks to a text
/// generation service.
///
/// Every adapter implements [`TextBackend`] and makes exactly one HTTP
/// attempt per call. Failures are reduced to the three [`BackendError`]
/// classes here, so callers never see transport details.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod anthropic;
pub mod gemini;
pub mod huggingface;
pub mod openai;

pub use anthropic::AnthropicBackend;
pub use gemini::GeminiBackend;
pub use huggingface::HuggingFaceBackend;
pub use openai::OpenAiBackend;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum BackendError {
    #[error("Backend rejected the credentials")]
    Auth,

    #[error("Backend is rate limited or unavailable")]
    RateLimitOrUnavailable,

    #[error("Backend returned no usable text")]
    EmptyResponse,
}

impl BackendError {
    pub fn code(&self) -> &'static str {
        match self {
            BackendError::Auth => "AUTH_ERROR",
            BackendError::RateLimitOrUnavailable => "RATE_LIMIT_OR_UNAVAILABLE",
            BackendError::EmptyResponse => "EMPTY_RESPONSE",
        }
    }

    /// The message shown to the user. One per class.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendError::Auth => {
                "Failed to generate content. Please ensure you have provided a valid API key and try again."
            }
            BackendError::RateLimitOrUnavailable => {
                "Service temporarily unavailable. Please try again in a few moments."
            }
            BackendError::EmptyResponse => "No content generated. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// A single-call text generation capability. Implementations must be cheap
/// to share behind an `Arc`.
#[async_trait]
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Anthropic,
    OpenAi,
    Gemini,
    HuggingFace,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Anthropic => "anthropic",
            BackendKind::OpenAi => "openai",
            BackendKind::Gemini => "gemini",
            BackendKind::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this backend's credential.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            BackendKind::Anthropic => "ANTHROPIC_API_KEY",
            BackendKind::OpenAi => "OPENAI_API_KEY",
            BackendKind::Gemini => "GEMINI_API_KEY",
            BackendKind::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            BackendKind::Anthropic => anthropic::DEFAULT_MODEL,
            BackendKind::OpenAi => openai::DEFAULT_MODEL,
            BackendKind::Gemini => gemini::DEFAULT_MODEL,
            BackendKind::HuggingFace => huggingface::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(BackendKind::Anthropic),
            "openai" => Ok(BackendKind::OpenAi),
            "gemini" => Ok(BackendKind::Gemini),
            "huggingface" => Ok(BackendKind::HuggingFace),
            other => Err(anyhow!(
                "unknown backend '{other}' (expected anthropic, openai, gemini or huggingface)"
            )),
        }
    }
}

/// Builds the adapter selected by `config`. A missing credential is not an
/// error here; the adapter reports `BackendError::Auth` on first use.
pub fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn TextBackend>> {
    let client = http_client(Duration::from_secs(config.timeout_secs))?;
    let api_key = config.api_key().map(str::to_string);
    let model = config.model().to_string();

    let backend: Arc<dyn TextBackend> = match config.backend {
        BackendKind::Anthropic => Arc::new(AnthropicBackend::new(client, api_key, model)),
        BackendKind::OpenAi => Arc::new(OpenAiBackend::new(client, api_key, model)),
        BackendKind::Gemini => Arc::new(GeminiBackend::new(client, api_key, model)),
        BackendKind::HuggingFace => Arc::new(HuggingFaceBackend::new(client, api_key, model)),
    };
    Ok(backend)
}

pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

// ────────────────────────────────────────────────────────────────────────────
// Shared HTTP handling
// ────────────────────────────────────────────────────────────────────────────

/// Maps a non-success HTTP status to an error class.
pub fn classify_status(status: u16, body: &str) -> BackendError {
    match status {
        401 | 403 => BackendError::Auth,
        400 if mentions_api_key(body) => BackendError::Auth,
        _ => BackendError::RateLimitOrUnavailable,
    }
}

fn mentions_api_key(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    ["api key", "api_key", "apikey"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// The credential, or `Auth` without sending anything.
pub(crate) fn require_key<'a>(backend: &str, api_key: &'a Option<String>) -> Result<&'a str, BackendError> {
    match api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => {
            warn!(backend, "No API key configured");
            Err(BackendError::Auth)
        }
    }
}

/// Sends `request` once and returns the success body.
pub(crate) async fn send(backend: &str, request: RequestBuilder) -> Result<String, BackendError> {
    let response = request.send().await.map_err(|e| {
        warn!(backend, error = %redacted(e), "Backend request failed");
        BackendError::RateLimitOrUnavailable
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        warn!(backend, error = %redacted(e), "Failed to read backend response body");
        BackendError::RateLimitOrUnavailable
    })?;

    if !status.is_success() {
        let error = classify_status(status.as_u16(), &body);
        warn!(backend, status = status.as_u16(), code = error.code(), "Backend returned {}", status);
        debug!(backend, "Backend error body: {}", body);
        return Err(error);
    }

    Ok(body)
}

/// Transport error text without the request URL, which may carry a key.
fn redacted(e: reqwest::Error) -> String {
    e.without_url().to_string()
}

/// Trims extracted text; blank counts as no response.
pub(crate) fn non_blank(text: Option<&str>) -> Result<String, BackendError> {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(BackendError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        assert_eq!(classify_status(401, ""), BackendError::Auth);
        assert_eq!(classify_status(403, "forbidden"), BackendError::Auth);
        assert_eq!(
            classify_status(400, r#"{"error":{"message":"API key not valid"}}"#),
            BackendError::Auth
        );
    }

    #[test]
    fn test_classify_everything_else_as_unavailable() {
        assert_eq!(classify_status(429, ""), BackendError::RateLimitOrUnavailable);
        assert_eq!(classify_status(503, ""), BackendError::RateLimitOrUnavailable);
        assert_eq!(
            classify_status(400, "prompt too long"),
            BackendError::RateLimitOrUnavailable
        );
        assert_eq!(classify_status(404, ""), BackendError::RateLimitOrUnavailable);
    }

    #[test]
    fn test_missing_or_blank_key_is_auth() {
        assert_eq!(require_key("test", &None), Err(BackendError::Auth));
        assert_eq!(
            require_key("test", &Some("  ".to_string())),
            Err(BackendError::Auth)
        );
        assert_eq!(require_key("test", &Some("k".to_string())), Ok("k"));
    }

    #[tokio::test]
    async fn test_transport_error_log_omits_query_key() {
        let err = Client::new()
            .get("http://127.0.0.1:9/v1beta/models/gemini-pro:generateContent")
            .query(&[("key", "AIzaSECRET")])
            .timeout(Duration::from_millis(200))
            .send()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AIzaSECRET"));

        let logged = redacted(err);
        assert!(!logged.contains("AIzaSECRET"));
        assert!(!logged.is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_unavailable() {
        let request = Client::new()
            .get("http://127.0.0.1:9/")
            .query(&[("key", "AIzaSECRET")])
            .timeout(Duration::from_millis(200));
        assert_eq!(
            send("gemini", request).await,
            Err(BackendError::RateLimitOrUnavailable)
        );
    }

    #[test]
    fn test_non_blank_rejects_whitespace() {
        assert_eq!(non_blank(Some(" \n")), Err(BackendError::EmptyResponse));
        assert_eq!(non_blank(None), Err(BackendError::EmptyResponse));
        assert_eq!(non_blank(Some(" hi ")), Ok("hi".to_string()));
    }

    #[test]
    fn test_backend_kind_parses_case_insensitively() {
        assert_eq!("Gemini".parse::<BackendKind>().unwrap(), BackendKind::Gemini);
        assert_eq!(" openai ".parse::<BackendKind>().unwrap(), BackendKind::OpenAi);
        assert!("cohere".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_user_messages_are_distinct_per_class() {
        let messages = [
            BackendError::Auth.user_message(),
            BackendError::RateLimitOrUnavailable.user_message(),
            BackendError::EmptyResponse.user_message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }
}
