//! Engine selection: selector string in, fallback chain out.

use crate::cohere::CohereModel;
use crate::error::ModelError;
use crate::fallback::FallbackChain;
use crate::gemini::GeminiModel;
use crate::groq::GroqModel;
use crate::ollama::OllamaModel;
use tracing::warn;

/// Engine used when no selector is given or the selector is unknown.
pub const DEFAULT_ENGINE: &str = "gemini";

/// API keys for the hosted vendors.
///
/// Gemini is the universal fallback, so its key is the only one that is
/// required. A missing vendor key degrades that selector to the default
/// chain instead of failing the request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Google Generative Language API key.
    pub gemini_api_key: Option<String>,
    /// Groq API key.
    pub groq_api_key: Option<String>,
    /// Cohere API key.
    pub cohere_api_key: Option<String>,
}

impl Credentials {
    /// Read keys from `GEMINI_API_KEY`, `GROQ_API_KEY` and `COHERE_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            cohere_api_key: std::env::var("COHERE_API_KEY").ok(),
        }
    }

    fn gemini_key(&self) -> Result<&str, ModelError> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ModelError::configuration("GEMINI_API_KEY not set"))
    }
}

/// Build the fallback chain for an engine selector.
///
/// Every chain ends in Gemini flash, so the Gemini key is always
/// required. Selectors: `"gemini"` (default), `"gemini-pro"`, `"groq"`,
/// `"cohere-free"`, `"ollama"`. Unknown selectors warn and use the
/// default chain.
pub fn resolve_engine(selector: &str, credentials: &Credentials) -> Result<FallbackChain, ModelError> {
    let gemini_key = credentials.gemini_key()?;
    let flash = GeminiModel::flash(gemini_key);

    let chain = match selector {
        "gemini" => FallbackChain::new().with_model(flash),
        "gemini-pro" => FallbackChain::new()
            .with_model(GeminiModel::pro(gemini_key))
            .with_model(flash),
        "groq" => match credentials.groq_api_key.as_deref() {
            Some(key) => FallbackChain::new()
                .with_model(GroqModel::new(key))
                .with_model(flash),
            None => {
                warn!("GROQ_API_KEY not set, falling back to default engine");
                FallbackChain::new().with_model(flash)
            }
        },
        "cohere-free" => match credentials.cohere_api_key.as_deref() {
            Some(key) => FallbackChain::new()
                .with_model(CohereModel::new(key))
                .with_model(flash),
            None => {
                warn!("COHERE_API_KEY not set, falling back to default engine");
                FallbackChain::new().with_model(flash)
            }
        },
        "ollama" => FallbackChain::new()
            .with_model(OllamaModel::default())
            .with_model(flash),
        other => {
            warn!(selector = other, "unknown engine selector, using default");
            FallbackChain::new().with_model(flash)
        }
    };

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> Credentials {
        Credentials {
            gemini_api_key: Some("g-key".into()),
            groq_api_key: Some("q-key".into()),
            cohere_api_key: Some("c-key".into()),
        }
    }

    #[test]
    fn known_selectors_build_expected_chains() {
        let creds = full_credentials();

        let chain = resolve_engine("gemini", &creds).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.primary_engine(), Some("gemini"));

        let chain = resolve_engine("groq", &creds).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.primary_engine(), Some("groq"));

        let chain = resolve_engine("cohere-free", &creds).unwrap();
        assert_eq!(chain.primary_engine(), Some("cohere-free"));

        let chain = resolve_engine("gemini-pro", &creds).unwrap();
        assert_eq!(chain.primary_engine(), Some("gemini-pro"));

        let chain = resolve_engine("ollama", &creds).unwrap();
        assert_eq!(chain.primary_engine(), Some("ollama"));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn unknown_selector_degrades_to_default() {
        let chain = resolve_engine("gpt-5000", &full_credentials()).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.primary_engine(), Some(DEFAULT_ENGINE));
    }

    #[test]
    fn missing_vendor_key_degrades_to_default() {
        let creds = Credentials {
            gemini_api_key: Some("g-key".into()),
            ..Default::default()
        };
        let chain = resolve_engine("groq", &creds).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.primary_engine(), Some("gemini"));
    }

    #[test]
    fn missing_gemini_key_is_an_error() {
        let err = resolve_engine("gemini", &Credentials::default()).unwrap_err();
        assert!(matches!(err, ModelError::Configuration(_)));
        // Even non-gemini selectors need the fallback key.
        let creds = Credentials {
            groq_api_key: Some("q-key".into()),
            ..Default::default()
        };
        assert!(resolve_engine("groq", &creds).is_err());
    }
}
