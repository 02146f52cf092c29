//! # testmate
//!
//! Turn a free-text requirement into structured, exportable test cases
//! using an LLM, with engine fallback and tolerant parsing.
//!
//! The pipeline: [`build_prompt`](testmate_prompts::build_prompt) embeds
//! the requirement in a fixed output template, a
//! [`FallbackChain`](testmate_models::FallbackChain) tries engines in
//! order until one answers, [`parse_response`](testmate_parser::parse_response)
//! extracts test cases from whatever came back (total, never fails), and
//! [`to_export_matrix`](testmate_export::to_export_matrix) flattens the
//! result for spreadsheets or delimited text. An optional first stage,
//! [`improve_requirement`], asks a model to reword the raw requirement
//! before generation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use testmate::prelude::*;
//!
//! # async fn run() -> Result<(), testmate::ModelError> {
//! let chain = resolve_engine("groq", &Credentials::from_env())?;
//! let request = GenerationRequest::new("Users can reset their password").with_count(5);
//!
//! let generation = generate_test_cases(&request, &chain, &GenerationSettings::new()).await?;
//! println!("{} cases from {}", generation.parsed_count, generation.engine);
//!
//! let matrix = to_export_matrix(&generation.test_cases);
//! write_csv(&matrix, std::io::stdout()).ok();
//! # Ok(())
//! # }
//! ```
//!
//! When every engine in the chain fails, the error is returned and
//! [`TestCaseSet::manual_entry_placeholder`](testmate_core::TestCaseSet::manual_entry_placeholder)
//! provides the record to show instead.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod generate;

pub use generate::{generate_test_cases, improve_requirement, Generation, Generator, Improvement};

pub use testmate_core::{
    clamp_count, GenerationRecord, GenerationRequest, GenerationSettings, HistoryRepository,
    InMemoryHistory, Step, TestCase, TestCaseSet, MAX_TEST_CASE_COUNT,
};
pub use testmate_export::{
    export_all, to_export_matrix, write_csv, write_tsv, BatchReport, ExportError, ExportFormat,
    ExportMatrix, MergeRange,
};
pub use testmate_models::{
    resolve_engine, CohereModel, Credentials, FallbackChain, GeminiModel, GeneratedText,
    GroqModel, MockTextModel, ModelError, OllamaModel, TextModel, DEFAULT_ENGINE,
};
pub use testmate_parser::{extract_improved_requirement, parse_response, reconcile, CountOutcome};
pub use testmate_prompts::{build_improve_prompt, build_prompt, detect_count, BuiltPrompt};

/// The working set, importable in one line.
pub mod prelude {
    pub use crate::generate::{
        generate_test_cases, improve_requirement, Generation, Generator, Improvement,
    };
    pub use testmate_core::{
        GenerationRequest, GenerationSettings, HistoryRepository, InMemoryHistory, Step, TestCase,
        TestCaseSet, MAX_TEST_CASE_COUNT,
    };
    pub use testmate_export::{to_export_matrix, write_csv, write_tsv, ExportFormat, ExportMatrix};
    pub use testmate_models::{
        resolve_engine, Credentials, FallbackChain, ModelError, TextModel, DEFAULT_ENGINE,
    };
    pub use testmate_parser::{extract_improved_requirement, parse_response, reconcile, CountOutcome};
    pub use testmate_prompts::{build_improve_prompt, build_prompt, detect_count, BuiltPrompt};
}
