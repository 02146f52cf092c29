//! Tier 2: textual segmentation by named dialect strategies.
//!
//! Each strategy recognizes one layout a model may use for test cases.
//! Strategies are tried in order; the first one that produces at least
//! one candidate wins. Text between the end of one candidate and the
//! next heading marker is discarded.

use crate::{fields, steps};
use regex::Regex;
use std::sync::OnceLock;
use testmate_core::{Step, TestCase, TestCaseSet};
use tracing::debug;

/// The accepted textual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    /// `**Test Case N: Name**` (or `Test Case N:`) heading segments with
    /// bold-labeled fields and `**Action:** / **Expected Result:**` steps.
    BoldHeading,
    /// Line-oriented `Test Case Name:` / `Description:` / `Precondition:`
    /// labels with pipe-delimited step lines.
    LabeledField,
}

fn heading_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Bold marker anywhere, plain marker only at line start.
    RE.get_or_init(|| {
        Regex::new(r"(?m)(?:\*\*\s*|^\s*)Test Case\s+\d+\s*:").expect("valid regex")
    })
}

/// Parse markdown-ish text by trying each dialect in order.
///
/// Returns `None` when no dialect produces a candidate.
pub(crate) fn parse_markdown(raw: &str) -> Option<TestCaseSet> {
    for dialect in [Dialect::BoldHeading, Dialect::LabeledField] {
        let cases = match dialect {
            Dialect::BoldHeading => parse_bold_heading(raw),
            Dialect::LabeledField => parse_labeled_field(raw),
        };
        if !cases.is_empty() {
            debug!(?dialect, candidates = cases.len(), "Dialect matched");
            return Some(TestCaseSet::from(cases));
        }
    }
    None
}

/// Split on heading markers; each segment between markers is one candidate.
fn parse_bold_heading(raw: &str) -> Vec<TestCase> {
    let marker = heading_marker_re();
    let matches: Vec<_> = marker.find_iter(raw).collect();
    if matches.is_empty() {
        return Vec::new();
    }

    let mut cases = Vec::with_capacity(matches.len());
    for (i, m) in matches.iter().enumerate() {
        let segment_end = matches.get(i + 1).map(|n| n.start()).unwrap_or(raw.len());
        let segment = &raw[m.end()..segment_end];

        let name = fields::extract_name(segment);
        let case = TestCase {
            name,
            description: fields::extract_objective(segment),
            precondition: fields::extract_precondition(segment),
            steps: steps::extract_steps(segment),
        };
        cases.push(case);
    }
    cases
}

/// Line scan for the colon-labeled dialect: a `Test Case Name:` line opens
/// a candidate, label lines fill fields, pipe lines become steps.
fn parse_labeled_field(raw: &str) -> Vec<TestCase> {
    let mut cases: Vec<TestCase> = Vec::new();
    let mut current: Option<TestCase> = None;

    for line in raw.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if let Some(value) = label_value(trimmed, &lower, &["test case name:"]) {
            if let Some(case) = current.take() {
                cases.push(case);
            }
            current = Some(TestCase::new(value));
        } else if let Some(value) =
            label_value(trimmed, &lower, &["test case description:", "description:"])
        {
            if let Some(case) = current.as_mut() {
                case.description = value;
            }
        } else if let Some(value) =
            label_value(trimmed, &lower, &["test case precondition:", "precondition:"])
        {
            if let Some(case) = current.as_mut() {
                case.precondition = value;
            }
        } else if trimmed.contains('|') {
            if let (Some(case), Some(step)) = (current.as_mut(), Step::parse(trimmed)) {
                case.steps.push(step);
            }
        }
    }

    if let Some(case) = current.take() {
        cases.push(case);
    }
    cases
}

/// Return the text after the first matching label prefix, if any.
fn label_value(line: &str, lower: &str, labels: &[&str]) -> Option<String> {
    for label in labels {
        if lower.starts_with(label) {
            return Some(line[label.len()..].trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bold_heading_segments_in_order() {
        let raw = "**Test Case 1: First**\ntext\n**Test Case 2: Second**\nmore";
        let cases = parse_bold_heading(raw);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "First");
        assert_eq!(cases[1].name, "Second");
    }

    #[test]
    fn plain_heading_at_line_start_is_accepted() {
        let raw = "Test Case 1: Plain Style\nObjective text\n";
        let cases = parse_bold_heading(raw);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "Plain Style");
    }

    #[test]
    fn preamble_before_first_heading_is_discarded() {
        let raw = "## Requirement Overview\nsome restatement\n\n\
                   **Test Case 1: Only One**\n**Objective:** o\n";
        let cases = parse_bold_heading(raw);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].description, "o");
    }

    #[test]
    fn no_headings_means_no_candidates() {
        assert!(parse_bold_heading("nothing to see").is_empty());
    }

    #[test]
    fn labeled_field_collects_cases_and_steps() {
        let raw = "Test Case Name: One\n\
                   Description: first\n\
                   1 | do | done\n\
                   Test Case Name: Two\n\
                   Precondition: ready\n\
                   1 | act | observed\n\
                   2 | act again | observed again\n";
        let cases = parse_labeled_field(raw);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "One");
        assert_eq!(cases[0].description, "first");
        assert_eq!(cases[0].steps.len(), 1);
        assert_eq!(cases[1].precondition, "ready");
        assert_eq!(cases[1].steps.len(), 2);
    }

    #[test]
    fn labeled_field_ignores_pipes_before_any_case() {
        let raw = "a | stray | row\nTest Case Name: Real\n1 | a | b\n";
        let cases = parse_labeled_field(raw);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].steps.len(), 1);
    }

    #[test]
    fn label_matching_is_case_insensitive() {
        let raw = "TEST CASE NAME: Shouty\nDESCRIPTION: loud\n";
        let cases = parse_labeled_field(raw);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "Shouty");
        assert_eq!(cases[0].description, "loud");
    }
}
