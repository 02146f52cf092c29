//! Test-case records: steps, cases, and the set produced per generation.
//!
//! A [`Step`] has two equivalent representations that interconvert
//! losslessly: the object form (`index` / `action` / `expected_result`)
//! and the display form `"<index> | <action> | <expected_result>"`.
//! Pipe characters inside a field are not escaped; a field containing `|`
//! will not round-trip. This mirrors the wire format the models are asked
//! to produce and is a documented limitation.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single test step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Step number as written by the model ("1", "2a", ...).
    pub index: String,
    /// The action to perform.
    pub action: String,
    /// The expected outcome of the action.
    #[serde(rename = "expectedResult")]
    pub expected_result: String,
}

impl Step {
    /// Create a step from its parts.
    pub fn new(
        index: impl Into<String>,
        action: impl Into<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            action: action.into(),
            expected_result: expected_result.into(),
        }
    }

    /// Parse the pipe-delimited display form `"N | action | expected"`.
    ///
    /// Requires at least three pipe-separated fields; surrounding
    /// whitespace is trimmed and any fields past the third are dropped.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('|').map(str::trim).collect();
        if parts.len() < 3 {
            return None;
        }
        Some(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Parse the display form, degrading to an action-only step when the
    /// text has no pipe structure. Never fails.
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| Self::new("", s.trim(), ""))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.index, self.action, self.expected_result)
    }
}

// Model JSON may carry steps either as objects or as bare pipe strings,
// and numeric indexes arrive as JSON numbers.
impl<'de> Deserialize<'de> for Step {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Index {
            Text(String),
            Number(i64),
        }

        impl Index {
            fn into_string(self) -> String {
                match self {
                    Index::Text(s) => s,
                    Index::Number(n) => n.to_string(),
                }
            }
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Object {
                #[serde(default)]
                index: Option<Index>,
                #[serde(default)]
                action: String,
                #[serde(default, alias = "expectedResult", alias = "expected")]
                expected_result: String,
            },
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Ok(Step::parse_lossy(&s)),
            Repr::Object {
                index,
                action,
                expected_result,
            } => Ok(Step {
                index: index.map(Index::into_string).unwrap_or_default(),
                action,
                expected_result,
            }),
        }
    }
}

/// A structured test case extracted from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case name; defaults to `"Test Case N"` when unextractable.
    #[serde(default)]
    pub name: String,
    /// Short description of what the case verifies. May be empty.
    #[serde(default, alias = "objective")]
    pub description: String,
    /// Setup or data prerequisites. May be empty.
    #[serde(default, alias = "preconditions")]
    pub precondition: String,
    /// Ordered steps; never empty after parsing.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl TestCase {
    /// Create an empty test case with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            precondition: String::new(),
            steps: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the precondition.
    #[must_use]
    pub fn with_precondition(mut self, precondition: impl Into<String>) -> Self {
        self.precondition = precondition.into();
        self
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Synthesize the single fallback step for a case whose steps could
    /// not be extracted.
    ///
    /// Names that mention "invalid" or "error" get an error-message
    /// expectation; everything else expects the scenario to succeed.
    pub fn fallback_step(name: &str) -> Step {
        let lower = name.to_lowercase();
        if lower.contains("invalid") || lower.contains("error") {
            Step::new(
                "1",
                format!("Attempt {}", lower),
                "Appropriate error message should be displayed",
            )
        } else {
            Step::new(
                "1",
                format!("Execute {} scenario", lower),
                "Expected functionality should work correctly",
            )
        }
    }

    /// Guarantee the case has a name and at least one step.
    ///
    /// `ordinal` is the 1-based position used for the default name.
    pub fn normalize(&mut self, ordinal: usize) {
        if self.name.trim().is_empty() {
            self.name = format!("Test Case {}", ordinal);
        }
        if self.steps.is_empty() {
            self.steps.push(Self::fallback_step(&self.name));
        }
    }
}

/// The ordered set of test cases produced by one generation call.
///
/// A set replaces, never merges with, the previous one: regeneration and
/// count-based re-requests each produce a fresh set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCaseSet(Vec<TestCase>);

impl TestCaseSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cases in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a case.
    pub fn push(&mut self, case: TestCase) {
        self.0.push(case);
    }

    /// Iterate over the cases.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.0.iter()
    }

    /// Normalize every case: default names and fallback steps.
    pub fn normalize(&mut self) {
        for (i, case) in self.0.iter_mut().enumerate() {
            case.normalize(i + 1);
        }
    }

    /// The terminal fallback shown when every configured engine failed
    /// and no response text exists to parse.
    pub fn manual_entry_placeholder() -> Self {
        let mut case = TestCase::new("Manual Entry Required")
            .with_description(
                "All configured engines failed to generate test cases. \
                 Enter test cases manually or retry with another engine.",
            )
            .with_precondition("Check engine credentials and connectivity");
        case.steps.push(TestCase::fallback_step(&case.name));
        Self(vec![case])
    }
}

impl From<Vec<TestCase>> for TestCaseSet {
    fn from(cases: Vec<TestCase>) -> Self {
        Self(cases)
    }
}

impl std::ops::Deref for TestCaseSet {
    type Target = [TestCase];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for TestCaseSet {
    type Item = TestCase;
    type IntoIter = std::vec::IntoIter<TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TestCaseSet {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
