//! Groq backend over the OpenAI-compatible chat completions API.

use crate::error::ModelError;
use crate::model::TextModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use testmate_core::GenerationSettings;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_TEMPERATURE: f64 = 0.3;
const DEFAULT_MAX_TOKENS: u64 = 4096;

/// Groq model over the chat completions endpoint.
#[derive(Debug, Clone)]
pub struct GroqModel {
    model_name: String,
    api_key: String,
    base_url: String,
    client: Client,
    default_timeout: Duration,
}

impl GroqModel {
    /// Create a model with the default `llama3-8b-8192`.
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

    /// Create from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ModelError> {
        let key = std::env::var("GROQ_API_KEY")
            .map_err(|_| ModelError::configuration("GROQ_API_KEY not set"))?;
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
        if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
            match status {
                401 => return ModelError::auth(err.error.message),
                429 => return ModelError::rate_limited(None),
                _ => {}
            }
            return ModelError::Api {
                message: err.error.message,
                code: err.error.code,
            };
        }
        ModelError::http(status, body)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[async_trait]
impl TextModel for GroqModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn engine(&self) -> &str {
        "groq"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ModelError> {
        let body = ChatCompletionRequest {
            model: &self.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: settings.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            top_p: settings.top_p,
            stream: false,
        };

        let timeout = settings.timeout.unwrap_or(self.default_timeout);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
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

        let resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::invalid_response(e.to_string()))?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
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
    fn default_model_and_engine() {
        let model = GroqModel::new("key");
        assert_eq!(model.name(), "llama3-8b-8192");
        assert_eq!(model.engine(), "groq");
        assert_eq!(model.identifier(), "groq:llama3-8b-8192");
    }

    #[test]
    fn request_serializes_openai_shape() {
        let body = ChatCompletionRequest {
            model: "llama3-8b-8192",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.3,
            max_tokens: 4096,
            top_p: None,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 4096);
        assert!(json.get("top_p").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn error_body_is_mapped_by_status() {
        let model = GroqModel::new("key");
        let body = r#"{"error": {"message": "invalid api key", "code": "invalid_api_key"}}"#;

        assert!(matches!(
            model.handle_error_response(401, body),
            ModelError::Authentication(_)
        ));
        assert!(matches!(
            model.handle_error_response(429, body),
            ModelError::RateLimited { .. }
        ));
        match model.handle_error_response(400, body) {
            ModelError::Api { code, .. } => assert_eq!(code.as_deref(), Some("invalid_api_key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
