//! The text-model trait: one prompt in, one raw text blob out.

use crate::error::ModelError;
use async_trait::async_trait;
use testmate_core::GenerationSettings;

/// A text-generation backend.
///
/// The generation pipeline needs only this: send one prompt, await one
/// blob of text. Everything about the vendor's wire format stays behind
/// the implementation. An empty body is an error
/// ([`ModelError::EmptyResponse`]), never an empty `Ok`.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Model name (e.g., "gemini-1.5-flash").
    fn name(&self) -> &str;

    /// Engine/vendor selector this model belongs to (e.g., "gemini").
    fn engine(&self) -> &str;

    /// Full identifier, `engine:name`.
    fn identifier(&self) -> String {
        format!("{}:{}", self.engine(), self.name())
    }

    /// Generate text for a prompt.
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ModelError>;
}

/// Boxed model for chain composition.
pub type BoxedTextModel = Box<dyn TextModel>;
