//! Step extraction for candidate segments.
//!
//! Two sub-dialects are supported:
//!
//! - labeled numbered steps: `N. **Action:** ... **Expected Result:** ...`
//! - pipe-delimited lines: `N | action | expected`, including Markdown
//!   table rows (header and separator rows are discarded)
//!
//! The labeled form is tried first since it is what the prompt template
//! requests; pipe lines are the fallback. The extractors slice between
//! marker matches instead of using lookaheads, which keeps each boundary
//! decision inspectable.

use regex::Regex;
use std::sync::OnceLock;
use testmate_core::Step;

const STEPS_SECTION_LABEL: &str = "**Test Steps:**";
const EXPECTED_LABEL: &str = "**Expected Result:**";

fn action_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.\s*\*\*Action:\*\*").expect("valid regex"))
}

/// Extract ordered steps from one candidate segment.
///
/// Returns an empty vector when neither sub-dialect matches; fallback
/// synthesis is the caller's concern.
pub(crate) fn extract_steps(segment: &str) -> Vec<Step> {
    let steps = labeled_steps(segment);
    if !steps.is_empty() {
        return steps;
    }
    pipe_steps(segment)
}

/// `N. **Action:** ... **Expected Result:** ...` runs.
fn labeled_steps(segment: &str) -> Vec<Step> {
    // Prefer the explicit steps section when present.
    let text = segment
        .find(STEPS_SECTION_LABEL)
        .map(|i| &segment[i + STEPS_SECTION_LABEL.len()..])
        .unwrap_or(segment);

    let marker = action_marker_re();
    let matches: Vec<_> = marker.captures_iter(text).collect();

    let mut steps = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let whole = caps.get(0).expect("match 0 always present");
        let body_end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let body = &text[whole.end()..body_end];

        let (action, expected) = match body.find(EXPECTED_LABEL) {
            Some(pos) => (&body[..pos], &body[pos + EXPECTED_LABEL.len()..]),
            None => (body, ""),
        };

        steps.push(Step::new(
            caps[1].to_string(),
            clean_fragment(action),
            clean_fragment(expected),
        ));
    }
    steps
}

/// Pipe-delimited lines and Markdown table rows.
fn pipe_steps(segment: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    for line in segment.lines() {
        let trimmed = line.trim().trim_matches('|');
        if !trimmed.contains('|') {
            continue;
        }
        let cells: Vec<&str> = trimmed.split('|').map(str::trim).collect();
        if cells.len() < 3 {
            continue;
        }
        // Header and separator rows carry no digit in the first cell.
        if !cells[0].chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        steps.push(Step::new(cells[0], cells[1], cells[2]));
    }
    steps
}

/// Trim whitespace and stray bold markers left at slice boundaries.
fn clean_fragment(fragment: &str) -> String {
    fragment.trim().trim_matches('*').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_steps_are_extracted_in_order() {
        let seg = "**Test Steps:**\n\
                   1. **Action:** Open the page\n\
                      **Expected Result:** Page loads\n\
                   2. **Action:** Click submit\n\
                      **Expected Result:** Form is sent\n";
        let steps = labeled_steps(seg);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], Step::new("1", "Open the page", "Page loads"));
        assert_eq!(steps[1], Step::new("2", "Click submit", "Form is sent"));
    }

    #[test]
    fn labeled_steps_without_section_header_still_match() {
        let seg = "1. **Action:** Do it\n**Expected Result:** Done\n";
        let steps = labeled_steps(seg);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].action, "Do it");
    }

    #[test]
    fn missing_expected_result_yields_empty_field() {
        let seg = "1. **Action:** Lone action\n";
        let steps = labeled_steps(seg);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].expected_result, "");
    }

    #[test]
    fn pipe_lines_become_steps() {
        let seg = "intro text\n1 | open | opens\n2 | close | closes\n";
        let steps = pipe_steps(seg);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1], Step::new("2", "close", "closes"));
    }

    #[test]
    fn markdown_table_rows_skip_header_and_separator() {
        let seg = "| Step | Action | Expected |\n\
                   |------|--------|----------|\n\
                   | 1 | open | opens |\n\
                   | 2 | close | closes |\n";
        let steps = pipe_steps(seg);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], Step::new("1", "open", "opens"));
    }

    #[test]
    fn labeled_dialect_wins_over_pipe_lines() {
        let seg = "1. **Action:** labeled\n**Expected Result:** ok\n\
                   9 | stray | row\n";
        let steps = extract_steps(seg);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].action, "labeled");
    }

    #[test]
    fn no_steps_returns_empty() {
        assert!(extract_steps("no steps in this text").is_empty());
    }
}
