use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{non_blank, require_key, send, BackendError, GenerationOptions, TextBackend};

const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL: &str = "tiiuae/falcon-7b-instruct";

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    temperature: f32,
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

/// Hugging Face Inference API, text-generation task.
pub struct HuggingFaceBackend {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl HuggingFaceBackend {
    pub fn new(client: Client, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextBackend for HuggingFaceBackend {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, BackendError> {
        let api_key = require_key(self.name(), &self.api_key)?;
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                temperature: options.temperature,
                max_new_tokens: options.max_output_tokens,
                return_full_text: false,
            },
        };

        let request = self
            .client
            .post(format!("{HF_API_BASE}/{}", self.model))
            .bearer_auth(api_key)
            .json(&body);

        let body = send(self.name(), request).await?;
        extract_text(&body)
    }
}

fn extract_text(body: &str) -> Result<String, BackendError> {
    let response: Vec<GeneratedText> =
        serde_json::from_str(body).map_err(|_| BackendError::EmptyResponse)?;
    let text = non_blank(response.first().and_then(|g| g.generated_text.as_deref()))?;
    Ok(keep_bullet_lines(&text))
}

/// Instruction-tuned models tend to echo the request around the bullets.
/// Keeps only `•` lines when there are any, otherwise the whole text.
fn keep_bullet_lines(text: &str) -> String {
    let bullets: Vec<&str> = text
        .lines()
        .filter(|line| line.trim_start().starts_with('•'))
        .collect();
    if bullets.is_empty() {
        text.to_string()
    } else {
        bullets.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_bullet_lines_when_present() {
        let body = r#"[{"generated_text": "Here are some points:\n• Built X\n  • Shipped Y\nHope this helps"}]"#;
        assert_eq!(extract_text(body).unwrap(), "• Built X\n  • Shipped Y");
    }

    #[test]
    fn test_falls_back_to_raw_text_without_bullets() {
        let body = r#"[{"generated_text": "Leadership, Chess"}]"#;
        assert_eq!(extract_text(body).unwrap(), "Leadership, Chess");
    }

    #[test]
    fn test_error_object_is_empty_response() {
        let body = r#"{"error": "Model is loading"}"#;
        assert_eq!(extract_text(body), Err(BackendError::EmptyResponse));
    }
}
