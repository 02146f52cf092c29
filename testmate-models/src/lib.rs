//! # testmate-models
//!
//! Model backends for test-case generation.
//!
//! Every backend implements [`TextModel`]: one prompt string in, one raw
//! text blob out. Resilience lives in [`FallbackChain`], which tries
//! backends in order and reports which engine actually served the request.
//!
//! ## Backends
//!
//! - [`GeminiModel`]: Google Generative Language API (flash/pro)
//! - [`GroqModel`]: Groq's OpenAI-compatible chat completions
//! - [`CohereModel`]: Cohere generate API (free-tier `command` model)
//! - [`OllamaModel`]: local Ollama server
//! - [`MockTextModel`]: scripted responses for tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use testmate_models::{Credentials, resolve_engine};
//! use testmate_core::GenerationSettings;
//!
//! # async fn run() -> Result<(), testmate_models::ModelError> {
//! let chain = resolve_engine("groq", &Credentials::from_env())?;
//! let generated = chain.generate("prompt text", &GenerationSettings::new()).await?;
//! println!("served by {}", generated.engine_label);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod cohere;
mod engine;
mod error;
mod fallback;
mod gemini;
mod groq;
mod mock;
mod model;
mod ollama;

pub use cohere::CohereModel;
pub use engine::{resolve_engine, Credentials, DEFAULT_ENGINE};
pub use error::{ModelError, ModelResult};
pub use fallback::{FallbackChain, GeneratedText};
pub use gemini::GeminiModel;
pub use groq::GroqModel;
pub use mock::MockTextModel;
pub use model::{BoxedTextModel, TextModel};
pub use ollama::OllamaModel;
