use anyhow::{bail, Context, Result};

use crate::backend::{BackendKind, GenerationOptions, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    /// Overrides the selected backend's default model.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Gemini,
            anthropic_api_key: None,
            openai_api_key: None,
            gemini_api_key: None,
            huggingface_api_key: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset and blank values take the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let backend = match get("TEXTGEN_BACKEND") {
            Some(raw) => raw
                .parse::<BackendKind>()
                .context("TEXTGEN_BACKEND is invalid")?,
            None => defaults.backend,
        };

        let temperature = parse_or(&get, "TEXTGEN_TEMPERATURE", defaults.temperature)?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("TEXTGEN_TEMPERATURE must be between 0.0 and 2.0, got {temperature}");
        }

        let max_output_tokens =
            parse_or(&get, "TEXTGEN_MAX_OUTPUT_TOKENS", defaults.max_output_tokens)?;
        if max_output_tokens == 0 {
            bail!("TEXTGEN_MAX_OUTPUT_TOKENS must be greater than zero");
        }

        Ok(Config {
            backend,
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            gemini_api_key: get("GEMINI_API_KEY"),
            huggingface_api_key: get("HUGGINGFACE_API_KEY"),
            model: get("TEXTGEN_MODEL"),
            temperature,
            max_output_tokens,
            timeout_secs: parse_or(&get, "TEXTGEN_TIMEOUT_SECS", defaults.timeout_secs)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Credential of the selected backend.
    pub fn api_key(&self) -> Option<&str> {
        match self.backend {
            BackendKind::Anthropic => self.anthropic_api_key.as_deref(),
            BackendKind::OpenAi => self.openai_api_key.as_deref(),
            BackendKind::Gemini => self.gemini_api_key.as_deref(),
            BackendKind::HuggingFace => self.huggingface_api_key.as_deref(),
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
