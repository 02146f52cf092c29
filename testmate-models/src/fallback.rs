//! Ordered fallback across model backends.

use crate::error::ModelError;
use crate::model::{BoxedTextModel, TextModel};
use testmate_core::GenerationSettings;
use tracing::{debug, warn};

/// Raw text from a chain, tagged with the engine that served it.
///
/// When a fallback served the request the label carries both engines,
/// e.g. `"gemini (groq fallback)"` for a Groq request answered by Gemini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    /// The raw model output.
    pub text: String,
    /// Which engine actually answered.
    pub engine_label: String,
}

/// An ordered list of models tried until one succeeds.
///
/// The first model is the one the caller asked for; the rest are
/// fallbacks. The last failure is propagated when every model fails.
pub struct FallbackChain {
    models: Vec<BoxedTextModel>,
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("models", &self.models.len())
            .finish()
    }
}

impl FallbackChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Append a model to the chain.
    #[must_use]
    pub fn with_model(mut self, model: impl TextModel + 'static) -> Self {
        self.models.push(Box::new(model));
        self
    }

    /// Append a boxed model to the chain.
    #[must_use]
    pub fn with_boxed_model(mut self, model: BoxedTextModel) -> Self {
        self.models.push(model);
        self
    }

    /// Number of models in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the chain has no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Engine of the primary (first) model, if any.
    #[must_use]
    pub fn primary_engine(&self) -> Option<&str> {
        self.models.first().map(|m| m.engine())
    }

    /// Try each model in order until one returns text.
    pub async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<GeneratedText, ModelError> {
        if self.models.is_empty() {
            return Err(ModelError::configuration("No models in fallback chain"));
        }

        let primary = self.models[0].engine().to_string();
        let mut last_error = None;

        for (position, model) in self.models.iter().enumerate() {
            debug!(
                model = %model.identifier(),
                position,
                "attempting generation"
            );
            match model.generate(prompt, settings).await {
                Ok(text) => {
                    let engine_label = if position == 0 {
                        model.engine().to_string()
                    } else {
                        format!("{} ({} fallback)", model.engine(), primary)
                    };
                    debug!(engine = %engine_label, "generation succeeded");
                    return Ok(GeneratedText { text, engine_label });
                }
                Err(err) => {
                    warn!(
                        model = %model.identifier(),
                        error = %err,
                        "model failed, trying next in chain"
                    );
                    last_error = Some(err);
                }
            }
        }

        // models is non-empty, so at least one error was recorded
        Err(last_error
            .unwrap_or_else(|| ModelError::configuration("No models in fallback chain")))
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}
