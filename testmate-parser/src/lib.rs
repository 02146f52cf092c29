//! # testmate-parser
//!
//! Tolerant extraction of structured test cases from model output.
//!
//! Models are asked for a fixed Markdown template but do not reliably
//! produce it, so [`parse_response`] is a total function: it never errors,
//! never panics, and always returns at least one record. Extraction runs
//! in two tiers:
//!
//! 1. **Structured**: a fenced or embedded JSON array/object of test-case
//!    shapes is adopted directly after shape coercion.
//! 2. **Textual**: the raw text is segmented on a test-case heading marker
//!    by named dialect strategies, and each segment runs independent
//!    field and step extractors.
//!
//! A candidate with no extractable steps gets exactly one synthetic
//! fallback step; input with no candidates at all yields a single
//! diagnostic record pointing the user at the raw response.
//!
//! ## Example
//!
//! ```rust
//! use testmate_parser::parse_response;
//!
//! let raw = "**Test Case 1: Login Success**\n\
//!            **Objective:** Verify login works\n\
//!            **Test Steps:**\n\
//!            1. **Action:** Open the login page\n\
//!               **Expected Result:** Form is shown\n";
//! let set = parse_response(raw);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set[0].name, "Login Success");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

mod dialect;
mod fields;
mod improve;
mod json;
mod steps;

pub mod reconcile;

pub use improve::extract_improved_requirement;
pub use reconcile::{reconcile, CountOutcome};

use testmate_core::{TestCase, TestCaseSet};
use tracing::{debug, warn};

/// Parse raw model output into a test-case set.
///
/// Total: any input, including the empty string and binary garbage,
/// produces a non-empty set. Structured (JSON) extraction wins when its
/// payload actually parses; otherwise the textual dialects are tried, and
/// as a last resort a single diagnostic record is returned.
pub fn parse_response(raw: &str) -> TestCaseSet {
    if let Some(mut set) = json::parse_json_cases(raw) {
        debug!(cases = set.len(), "Adopted structured JSON test cases");
        set.normalize();
        return set;
    }

    if let Some(mut set) = dialect::parse_markdown(raw) {
        debug!(cases = set.len(), "Parsed test cases from markdown dialect");
        set.normalize();
        return set;
    }

    warn!(
        bytes = raw.len(),
        "Response matched no known dialect, returning diagnostic record"
    );
    let mut set = TestCaseSet::from(vec![diagnostic_case()]);
    set.normalize();
    set
}

/// The single record returned when no candidate could be extracted.
fn diagnostic_case() -> TestCase {
    TestCase::new("Parsing Failed - Check Raw Response")
        .with_description(
            "The engine returned a response that could not be parsed into \
             test cases. Inspect the raw response and extract them manually.",
        )
        .with_precondition("Review the raw engine response for test case details")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   \n\t  ")]
    #[case("just some prose with no structure")]
    #[case("\u{0}\u{1}\u{2}binary\u{3}garbage\u{4}")]
    #[case("{\"not\": \"a test case shape\"}")]
    #[case("[1, 2, 3]")]
    fn always_returns_at_least_one_record(#[case] raw: &str) {
        let set = parse_response(raw);
        assert!(!set.is_empty());
        for case in &set {
            assert!(!case.steps.is_empty());
            assert!(!case.name.is_empty());
        }
    }

    #[test]
    fn garbage_yields_the_diagnostic_record() {
        let set = parse_response("nothing useful here");
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].name, "Parsing Failed - Check Raw Response");
        assert_eq!(set[0].steps.len(), 1);
    }

    #[test]
    fn fenced_json_array_is_adopted_verbatim() {
        let raw = r#"Here you go:
```json
[{"name":"Login","description":"d","precondition":"p","steps":["1 | click | opens"]}]
```
Done."#;
        let set = parse_response(raw);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].name, "Login");
        assert_eq!(set[0].description, "d");
        assert_eq!(set[0].precondition, "p");
        assert_eq!(set[0].steps.len(), 1);
        assert_eq!(set[0].steps[0].to_string(), "1 | click | opens");
    }

    #[test]
    fn json_object_with_test_cases_field_is_adopted() {
        let raw = r#"```json
{"testCases": [{"name": "A"}, {"name": "B"}]}
```"#;
        let set = parse_response(raw);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name, "A");
        assert_eq!(set[1].name, "B");
        // shape coercion supplies the fallback step
        assert_eq!(set[0].steps.len(), 1);
    }

    #[test]
    fn invalid_fenced_json_falls_through_to_markdown() {
        let raw = "```json\n{not valid json\n```\n\
                   **Test Case 1: Recovered**\n\
                   **Objective:** still parsed\n";
        let set = parse_response(raw);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].name, "Recovered");
    }

    #[test]
    fn two_bold_headings_yield_two_ordered_cases() {
        let raw = "## Test Case Plan\n\
                   **Test Case 1: Login Success**\n\
                   **Objective:** Valid credentials log the user in\n\
                   **Preconditions:** A registered account exists\n\
                   **Test Steps:**\n\
                   1. **Action:** Enter valid credentials\n\
                      **Expected Result:** Dashboard is shown\n\
                   \n\
                   **Test Case 2: Login Failure**\n\
                   **Objective:** Wrong password is rejected\n\
                   **Test Steps:**\n\
                   1. **Action:** Enter a wrong password\n\
                      **Expected Result:** An error message appears\n";
        let set = parse_response(raw);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name, "Login Success");
        assert_eq!(set[1].name, "Login Failure");
        assert_eq!(set[0].precondition, "A registered account exists");
        assert_eq!(set[0].steps[0].action, "Enter valid credentials");
        assert_eq!(set[1].steps[0].expected_result, "An error message appears");
    }

    #[test]
    fn candidate_without_steps_gets_one_synthetic_step() {
        let raw = "**Test Case 1: Invalid Email Format**\n\
                   **Objective:** Bad addresses are rejected\n";
        let set = parse_response(raw);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].steps.len(), 1);
        assert!(set[0].steps[0]
            .expected_result
            .to_lowercase()
            .contains("error message"));
    }

    #[test]
    fn labeled_field_dialect_is_recognized() {
        let raw = "Test Case Name: Checkout Totals\n\
                   Description: Totals include tax\n\
                   Precondition: Cart has two items\n\
                   1 | Open the cart | Items are listed\n\
                   2 | Proceed to checkout | Total includes tax\n";
        let set = parse_response(raw);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].name, "Checkout Totals");
        assert_eq!(set[0].description, "Totals include tax");
        assert_eq!(set[0].steps.len(), 2);
        assert_eq!(set[0].steps[1].expected_result, "Total includes tax");
    }
}
