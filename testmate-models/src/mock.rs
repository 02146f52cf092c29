//! Scripted mock model for tests.

use crate::error::ModelError;
use crate::model::TextModel;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use testmate_core::GenerationSettings;

/// A model that replays scripted responses in order.
///
/// Each call to [`TextModel::generate`] pops the next scripted entry and
/// records the prompt it was given. An exhausted script is a
/// [`ModelError::Configuration`] so a test that over-calls fails loudly.
pub struct MockTextModel {
    name: String,
    engine: String,
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextModel {
    /// Create an empty mock with the given engine label.
    pub fn new(engine: impl Into<String>) -> Self {
        let engine = engine.into();
        Self {
            name: format!("mock-{engine}"),
            engine,
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response.
    #[must_use]
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.lock().push_back(Ok(text.into()));
        self
    }

    /// Queue an error.
    #[must_use]
    pub fn with_error(self, error: ModelError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn engine(&self) -> &str {
        &self.engine
    }

    async fn generate(
        &self,
        prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<String, ModelError> {
        self.prompts.lock().push(prompt.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::configuration("mock script exhausted")))
    }
}
