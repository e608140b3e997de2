use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{non_blank, require_key, send, BackendError, GenerationOptions, TextBackend};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Text of the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Anthropic Messages API.
pub struct AnthropicBackend {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl AnthropicBackend {
    pub fn new(client: Client, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextBackend for AnthropicBackend {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, BackendError> {
        let api_key = require_key(self.name(), &self.api_key)?;
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body);

        let body = send(self.name(), request).await?;
        extract_text(&body)
    }
}

fn extract_text(body: &str) -> Result<String, BackendError> {
    let response: AnthropicResponse =
        serde_json::from_str(body).map_err(|_| BackendError::EmptyResponse)?;
    if let Some(usage) = &response.usage {
        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            usage.input_tokens, usage.output_tokens
        );
    }
    non_blank(response.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_text_block() {
        let body = r#"{
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "  Hello there  "}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 3}
        }"#;
        assert_eq!(extract_text(body).unwrap(), "Hello there");
    }

    #[test]
    fn test_no_text_block_is_empty_response() {
        let body = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        assert_eq!(extract_text(body), Err(BackendError::EmptyResponse));
    }

    #[test]
    fn test_undecodable_body_is_empty_response() {
        assert_eq!(extract_text("<html>"), Err(BackendError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let backend = AnthropicBackend::new(Client::new(), None, DEFAULT_MODEL.to_string());
        let err = backend
            .generate("hi", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, BackendError::Auth);
    }
}
