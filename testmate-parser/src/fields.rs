//! Labeled-field extractors for heading-dialect segments.
//!
//! Each extractor tolerates an absent field: absence yields an empty
//! string, never an error.

use regex::Regex;
use std::sync::OnceLock;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([^*\n]+)").expect("valid regex"))
}

fn objective_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\*(?:Objective|Description):\*\*\s*([^*]+)").expect("valid regex")
    })
}

fn precondition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*Preconditions?:\*\*\s*([^*]+)").expect("valid regex"))
}

/// The case name: segment text up to the closing bold marker or the end
/// of the heading line.
pub(crate) fn extract_name(segment: &str) -> String {
    name_re()
        .captures(segment)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

/// The objective/description field; empty when absent.
pub(crate) fn extract_objective(segment: &str) -> String {
    capture_trimmed(objective_re(), segment)
}

/// The precondition field (singular or plural label); empty when absent.
pub(crate) fn extract_precondition(segment: &str) -> String {
    capture_trimmed(precondition_re(), segment)
}

fn capture_trimmed(re: &Regex, segment: &str) -> String {
    re.captures(segment)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_stops_at_bold_marker() {
        assert_eq!(extract_name(" Login Success**\nrest"), "Login Success");
    }

    #[test]
    fn name_stops_at_newline() {
        assert_eq!(extract_name(" Plain Name\nnext line"), "Plain Name");
    }

    #[test]
    fn missing_name_is_empty() {
        assert_eq!(extract_name("**bold right away"), "");
    }

    #[test]
    fn objective_and_description_labels_both_match() {
        let seg = "**Objective:** verify the flow\n**Preconditions:** none";
        assert_eq!(extract_objective(seg), "verify the flow");

        let seg = "**Description:** described here\n";
        assert_eq!(extract_objective(seg), "described here");
    }

    #[test]
    fn precondition_singular_and_plural() {
        assert_eq!(
            extract_precondition("**Precondition:** db is seeded\n"),
            "db is seeded"
        );
        assert_eq!(
            extract_precondition("**Preconditions:** user exists\n**Test Steps:**"),
            "user exists"
        );
    }

    #[test]
    fn absent_fields_are_empty() {
        assert_eq!(extract_objective("no labels here"), "");
        assert_eq!(extract_precondition("no labels here"), "");
    }
}
