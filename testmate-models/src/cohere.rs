//! Cohere backend (free-tier `command` model over `/v1/generate`).

use crate::error::ModelError;
use crate::model::TextModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use testmate_core::GenerationSettings;

const DEFAULT_BASE_URL: &str = "https://api.cohere.ai";
const DEFAULT_MODEL: &str = "command";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);
const DEFAULT_TEMPERATURE: f64 = 0.3;
const DEFAULT_MAX_TOKENS: u64 = 3000;
const DEFAULT_TOP_P: f64 = 0.8;

/// Cohere model over the legacy generate endpoint.
///
/// Reports as the `cohere-free` engine since it targets the trial tier,
/// where quota exhaustion surfaces as 402/429 rather than a soft limit.
#[derive(Debug, Clone)]
pub struct CohereModel {
    model_name: String,
    api_key: String,
    base_url: String,
    client: Client,
    default_timeout: Duration,
}

impl CohereModel {
    /// Create a model with the default `command` model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(DEFAULT_MODEL, api_key)
    }

    /// Create a model with an explicit model name.
    pub fn with_model(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from the `COHERE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ModelError> {
        let key = std::env::var("COHERE_API_KEY")
            .map_err(|_| ModelError::configuration("COHERE_API_KEY not set"))?;
        Ok(Self::new(key))
    }

    /// Set the base URL (tests point this at a local server).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the default timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn handle_error_response(&self, status: u16, body: &str) -> ModelError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| body.to_string());
        match status {
            401 => ModelError::auth(message),
            402 => ModelError::api_with_code(message, "payment_required"),
            429 => ModelError::rate_limited(None),
            _ => ModelError::http(status, message),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    max_tokens: u64,
    p: f64,
    truncate: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[async_trait]
impl TextModel for CohereModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn engine(&self) -> &str {
        "cohere-free"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ModelError> {
        let body = GenerateRequest {
            model: &self.model_name,
            prompt,
            temperature: settings.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            p: settings.top_p.unwrap_or(DEFAULT_TOP_P),
            truncate: "END",
        };

        let timeout = settings.timeout.unwrap_or(self.default_timeout);
        let response = self
            .client
            .post(format!("{}/v1/generate", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body));
        }

        let resp: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::invalid_response(e.to_string()))?;

        let text = resp
            .generations
            .into_iter()
            .next()
            .map(|g| g.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse(self.identifier()));
        }
        Ok(text)
    }
}
