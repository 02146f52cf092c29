//! The end-to-end generation pipeline.
//!
//! One call: build the prompt, await the fallback chain, parse the raw
//! text (total, never fails), reconcile the count. The only error path
//! is every model in the chain failing.

use std::sync::Arc;
use testmate_core::{
    GenerationRecord, GenerationRequest, GenerationSettings, HistoryRepository, InMemoryHistory,
    TestCaseSet,
};
use testmate_models::{FallbackChain, ModelError};
use testmate_parser::{extract_improved_requirement, parse_response, reconcile, CountOutcome};
use testmate_prompts::{build_improve_prompt, build_prompt};
use tracing::debug;

/// The result of one generation call.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The parsed, normalized test cases. Never empty.
    pub test_cases: TestCaseSet,
    /// The raw model output the cases were parsed from.
    pub raw: String,
    /// Engine label that served the request (possibly a fallback label).
    pub engine: String,
    /// The effective requested count, after detection and clamping.
    pub requested_count: Option<u32>,
    /// Number of cases actually parsed.
    pub parsed_count: usize,
    /// Requested-vs-parsed comparison. Diagnostic only.
    pub count_outcome: CountOutcome,
}

/// Run one requirement through prompt, chain, parse and reconcile.
pub async fn generate_test_cases(
    request: &GenerationRequest,
    chain: &FallbackChain,
    settings: &GenerationSettings,
) -> Result<Generation, ModelError> {
    let prompt = build_prompt(&request.requirement, request.requested_count);
    debug!(
        requested = ?prompt.effective_count,
        clamped = prompt.clamped,
        "prompt built"
    );

    let generated = chain.generate(&prompt.text, settings).await?;

    let test_cases = parse_response(&generated.text);
    let parsed_count = test_cases.len();
    let count_outcome = reconcile(prompt.effective_count, parsed_count);

    Ok(Generation {
        test_cases,
        raw: generated.text,
        engine: generated.engine_label,
        requested_count: prompt.effective_count,
        parsed_count,
        count_outcome,
    })
}

/// An improved requirement, tagged with the engine that reworded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improvement {
    /// The extracted improved requirement text.
    pub improved: String,
    /// The raw model reply the improvement was extracted from.
    pub raw: String,
    /// Engine label that served the request (possibly a fallback label).
    pub engine: String,
}

/// Ask a model to reword a raw requirement before generation.
///
/// The optional first stage of the flow: the improved text feeds a
/// subsequent [`generate_test_cases`] call as its requirement. The only
/// error path is every model in the chain failing.
pub async fn improve_requirement(
    requirement: &str,
    chain: &FallbackChain,
    settings: &GenerationSettings,
) -> Result<Improvement, ModelError> {
    let prompt = build_improve_prompt(requirement);
    let generated = chain.generate(&prompt, settings).await?;
    let improved = extract_improved_requirement(&generated.text);
    debug!(engine = %generated.engine_label, "requirement improved");

    Ok(Improvement {
        improved,
        raw: generated.text,
        engine: generated.engine_label,
    })
}

/// A chain plus settings plus history, bundled for repeated use.
///
/// Each successful generation is appended to the injected
/// [`HistoryRepository`]; the default is an in-memory store.
pub struct Generator {
    chain: FallbackChain,
    settings: GenerationSettings,
    history: Arc<dyn HistoryRepository>,
}

impl Generator {
    /// Create a generator over a chain with default settings and an
    /// in-memory history.
    #[must_use]
    pub fn new(chain: FallbackChain) -> Self {
        Self {
            chain,
            settings: GenerationSettings::new(),
            history: Arc::new(InMemoryHistory::new()),
        }
    }

    /// Set the generation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Inject a history repository.
    #[must_use]
    pub fn with_history(mut self, history: Arc<dyn HistoryRepository>) -> Self {
        self.history = history;
        self
    }

    /// Generate test cases and record the outcome in the history.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Generation, ModelError> {
        let generation = generate_test_cases(request, &self.chain, &self.settings).await?;
        self.history.save(GenerationRecord::new(
            request.requirement.clone(),
            generation.engine.clone(),
            generation.test_cases.clone(),
        ));
        Ok(generation)
    }

    /// Improve a raw requirement with this generator's chain and settings.
    ///
    /// Improvements are not recorded in the history; only completed
    /// generations are.
    pub async fn improve(&self, requirement: &str) -> Result<Improvement, ModelError> {
        improve_requirement(requirement, &self.chain, &self.settings).await
    }

    /// Past generations, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<GenerationRecord> {
        self.history.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testmate_models::MockTextModel;

    fn markdown_response() -> &'static str {
        "**Test Case 1: Login Success**\n\
         **Objective:** Verify a registered user can log in\n\
         **Preconditions:** User account exists\n\
         **Test Steps:**\n\
         1. **Action:** Open the login page\n\
            **Expected Result:** Login form is shown\n\
         2. **Action:** Submit valid credentials\n\
            **Expected Result:** Dashboard is shown\n\
         \n\
         **Test Case 2: Invalid Password**\n\
         **Objective:** Verify wrong passwords are rejected\n"
    }

    #[test]
    fn generation_carries_requested_and_parsed_counts() {
        let chain =
            FallbackChain::new().with_model(MockTextModel::new("gemini").with_response(
                markdown_response(),
            ));
        let request = GenerationRequest::new("login requirement").with_count(2);

        let generation = tokio_test::block_on(generate_test_cases(
            &request,
            &chain,
            &GenerationSettings::new(),
        ))
        .unwrap();

        assert_eq!(generation.parsed_count, 2);
        assert_eq!(generation.requested_count, Some(2));
        assert_eq!(generation.count_outcome, CountOutcome::Match(2));
        assert_eq!(generation.engine, "gemini");
        assert_eq!(generation.test_cases[0].name, "Login Success");
    }

    #[test]
    fn improve_extracts_the_marked_block() {
        let mock = MockTextModel::new("gemini")
            .with_response("Improved Prompt:\nA clearer user story.\nTest cases follow.");
        let chain = FallbackChain::new().with_model(mock);

        let improvement = tokio_test::block_on(improve_requirement(
            "vague requirement",
            &chain,
            &GenerationSettings::new(),
        ))
        .unwrap();

        assert_eq!(improvement.improved, "A clearer user story.");
        assert_eq!(improvement.engine, "gemini");
        assert!(improvement.raw.contains("Improved Prompt:"));
    }

    #[test]
    fn generator_records_history() {
        let chain = FallbackChain::new()
            .with_model(MockTextModel::new("groq").with_response(markdown_response()));
        let generator = Generator::new(chain);

        let request = GenerationRequest::new("login requirement");
        tokio_test::block_on(generator.generate(&request)).unwrap();

        let records = generator.history();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].requirement, "login requirement");
        assert_eq!(records[0].engine, "groq");
        assert_eq!(records[0].test_cases.len(), 2);
    }
}
