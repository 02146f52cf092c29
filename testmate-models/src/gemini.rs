//! Google Gemini backend (Generative Language API).

use crate::error::ModelError;
use crate::model::TextModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use testmate_core::GenerationSettings;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini model over the Generative Language REST API.
///
/// The API key travels in the URL query string, per Google's scheme.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    model_name: String,
    engine: &'static str,
    api_key: String,
    base_url: String,
    client: Client,
    default_timeout: Duration,
}

impl GeminiModel {
    /// Create a model for an explicit Gemini model name.
    pub fn new(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            engine: "gemini",
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The default flash-tier model.
    pub fn flash(api_key: impl Into<String>) -> Self {
        Self::new("gemini-1.5-flash", api_key)
    }

    /// The pro-tier model, reported under the "gemini-pro" engine.
    pub fn pro(api_key: impl Into<String>) -> Self {
        let mut model = Self::new("gemini-1.5-pro", api_key);
        model.engine = "gemini-pro";
        model
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(model_name: impl Into<String>) -> Result<Self, ModelError> {
        let key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ModelError::configuration("GEMINI_API_KEY not set"))?;
        Ok(Self::new(model_name, key))
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

    fn build_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        )
    }

    fn handle_error_response(&self, status: u16, body: &str) -> ModelError {
        if let Ok(err) = serde_json::from_str::<GeminiErrorResponse>(body) {
            match status {
                401 | 403 => return ModelError::auth(err.error.message),
                429 => return ModelError::rate_limited(None),
                _ => {}
            }
            return ModelError::Api {
                message: err.error.message,
                code: err.error.status,
            };
        }
        ModelError::http(status, body)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u64>,
}

impl GenerationConfig {
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
            max_output_tokens: settings.max_tokens,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn engine(&self) -> &str {
        self.engine
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ModelError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig::from_settings(settings),
        };

        let timeout = settings.timeout.unwrap_or(self.default_timeout);
        let response = self
            .client
            .post(self.build_url())
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

        let resp: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::invalid_response(e.to_string()))?;

        let text: String = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse(self.identifier()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_models_and_engines() {
        let flash = GeminiModel::flash("key");
        assert_eq!(flash.name(), "gemini-1.5-flash");
        assert_eq!(flash.engine(), "gemini");

        let pro = GeminiModel::pro("key");
        assert_eq!(pro.name(), "gemini-1.5-pro");
        assert_eq!(pro.engine(), "gemini-pro");
        assert_eq!(pro.identifier(), "gemini-pro:gemini-1.5-pro");
    }

    #[test]
    fn url_carries_model_and_key() {
        let model = GeminiModel::flash("test-key");
        let url = model.build_url();
        assert!(url.contains("generativelanguage.googleapis.com"));
        assert!(url.contains("gemini-1.5-flash:generateContent"));
        assert!(url.contains("key=test-key"));
    }

    #[test]
    fn error_body_is_mapped_by_status() {
        let model = GeminiModel::flash("key");
        let body = r#"{"error": {"message": "key invalid", "status": "PERMISSION_DENIED"}}"#;

        assert!(matches!(
            model.handle_error_response(403, body),
            ModelError::Authentication(_)
        ));
        assert!(matches!(
            model.handle_error_response(429, body),
            ModelError::RateLimited { .. }
        ));
        assert!(matches!(
            model.handle_error_response(400, body),
            ModelError::Api { .. }
        ));
        assert!(matches!(
            model.handle_error_response(500, "not json"),
            ModelError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn generation_config_omitted_when_settings_empty() {
        assert!(GenerationConfig::from_settings(&GenerationSettings::new()).is_none());
        let config =
            GenerationConfig::from_settings(&GenerationSettings::new().temperature(0.3)).unwrap();
        assert_eq!(config.temperature, Some(0.3));
    }
}
