//! Prompt construction: count detection, clamping, and the output template.

use regex::Regex;
use std::sync::OnceLock;
use testmate_core::{clamp_count, MAX_TEST_CASE_COUNT};
use tracing::debug;

fn count_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*(?:test\s*cases?|tests?)").expect("valid regex"))
}

/// A fully assembled prompt plus the count decision that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    /// The instruction text to send to the model.
    pub text: String,
    /// The count embedded in the exact-count instruction, if any.
    pub effective_count: Option<u32>,
    /// Whether the count was reduced to [`MAX_TEST_CASE_COUNT`].
    pub clamped: bool,
}

/// Detect an explicit count phrase like "5 test cases" in a requirement.
///
/// Matching is case-insensitive; the first match wins. Numbers too large
/// for `u32` saturate, so they get clamped downstream like any other
/// oversized count.
pub fn detect_count(requirement: &str) -> Option<u32> {
    count_phrase_re()
        .captures(requirement)
        .map(|caps| caps[1].parse::<u32>().unwrap_or(u32::MAX))
}

/// Build the instruction block for a requirement.
///
/// An explicit `requested_count` wins over a count detected in the
/// requirement text; either is clamped to [`MAX_TEST_CASE_COUNT`]. With a
/// count, the prompt demands exactly that many cases; without one it asks
/// for a flexible 3-7. Pure and total: empty input still yields a
/// well-formed (if vacuous) prompt.
pub fn build_prompt(requirement: &str, requested_count: Option<u32>) -> BuiltPrompt {
    let raw_count = requested_count.or_else(|| detect_count(requirement));
    let effective_count = raw_count.map(clamp_count);
    let clamped = raw_count.is_some_and(|n| n > MAX_TEST_CASE_COUNT);

    let count_instruction = match effective_count {
        Some(n) => format!(
            "Generate EXACTLY {n} functional test cases: numbered 1 through {n}, \
             no more, no fewer."
        ),
        None => "Generate 3-7 comprehensive functional test cases covering positive \
                 and negative flows."
            .to_string(),
    };

    debug!(
        effective_count,
        clamped, "Building structured test-case prompt"
    );

    let mut text = String::with_capacity(requirement.len() + 1536);
    text.push_str(
        "You are a world-class QA engineer. Create an exhaustive suite of functional \
         test cases for the requirement below. Do not include performance, security, \
         or other non-functional tests unless the requirement explicitly asks for them.\n\
         \n\
         Original requirement:\n\
         ---\n",
    );
    text.push('"');
    text.push_str(requirement);
    text.push_str("\"\n---\n\nINSTRUCTIONS:\n1. ");
    text.push_str(&count_instruction);
    text.push_str(
        "\n\
         2. Begin with a Requirement Overview: restate the requirement in clear QA language.\n\
         3. Cover positive flows and negative error-handling scenarios.\n\
         4. Use this exact Markdown format for every test case:\n\
         \n\
         **Test Case 1: [Name]**\n\
         **Objective:** Short description of the functionality being verified\n\
         **Preconditions:** Setup, configuration, or data prerequisites\n\
         **Test Steps:**\n\
         1. **Action:** Step description\n\
            **Expected Result:** Precise expected outcome\n\
         2. **Action:** ...\n\
            **Expected Result:** ...\n\
         \n\
         **Test Case 2: [Name]**\n\
         ... repeat for each test case\n\
         \n\
         5. Label each test case sequentially (1, 2, 3, ...).\n\
         6. Make steps detailed and concrete; never use placeholders.\n\
         7. Ensure every functional requirement from the original prompt is covered.\n",
    );

    BuiltPrompt {
        text,
        effective_count,
        clamped,
    }
}
