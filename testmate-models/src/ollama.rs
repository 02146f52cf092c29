//! Local Ollama backend.

use crate::error::ModelError;
use crate::model::TextModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use testmate_core::GenerationSettings;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3";
// Local inference on CPU can take a while.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Model served by a local Ollama instance. No API key required.
#[derive(Debug, Clone)]
pub struct OllamaModel {
    model_name: String,
    base_url: String,
    client: Client,
    default_timeout: Duration,
}

impl Default for OllamaModel {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl OllamaModel {
    /// Create a model with an explicit model name.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the Ollama server.
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
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u64>,
}

impl OllamaOptions {
    fn from_settings(settings: &GenerationSettings) -> Option<Self> {
        if settings.temperature.is_none()
            && settings.top_p.is_none()
            && settings.max_tokens.is_none()
        {
            return None;
        }
        Some(Self {
            temperature: settings.temperature,
            top_p: settings.top_p,
            num_predict: settings.max_tokens,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl TextModel for OllamaModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn engine(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ModelError> {
        let body = OllamaRequest {
            model: &self.model_name,
            prompt,
            stream: false,
            options: OllamaOptions::from_settings(settings),
        };

        let timeout = settings.timeout.unwrap_or(self.default_timeout);
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::http(status, body));
        }

        let resp: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ModelError::invalid_response(e.to_string()))?;

        if resp.response.trim().is_empty() {
            return Err(ModelError::EmptyResponse(self.identifier()));
        }
        Ok(resp.response)
    }
}
