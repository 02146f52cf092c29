//! Extraction of an improved requirement from model output.
//!
//! Some models answer the rewording instruction with a sectioned reply
//! ("Improved Prompt:" followed by the text, then sample test cases);
//! others return the improved text alone. Extraction is total either
//! way.

/// Pull the improved requirement out of a rewording response.
///
/// When the reply carries an "improved prompt" marker line followed
/// later by a "test case" marker line, the lines between them are the
/// improvement. Without that structure the whole trimmed reply is
/// taken as-is.
pub fn extract_improved_requirement(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();

    let start = lines
        .iter()
        .position(|line| line.to_lowercase().contains("improved prompt"));
    let end = lines
        .iter()
        .position(|line| line.to_lowercase().contains("test case"));

    if let (Some(start), Some(end)) = (start, end) {
        if end > start {
            return lines[start + 1..end].join("\n").trim().to_string();
        }
    }
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sectioned_reply_yields_the_marked_block() {
        let raw = "Improved Prompt:\n\
                   As a registered user, I want to log in with my email\n\
                   so that I can access my dashboard.\n\
                   \n\
                   Test Case 1: Login Success\n\
                   ...";
        assert_eq!(
            extract_improved_requirement(raw),
            "As a registered user, I want to log in with my email\n\
             so that I can access my dashboard."
        );
    }

    #[test]
    fn marker_matching_is_case_insensitive() {
        let raw = "Here is the IMPROVED PROMPT for you:\nbetter wording\nSample test cases:\n";
        assert_eq!(extract_improved_requirement(raw), "better wording");
    }

    #[test]
    fn plain_reply_is_taken_whole() {
        let raw = "\n  As a user, I want clearer requirements.  \n";
        assert_eq!(
            extract_improved_requirement(raw),
            "As a user, I want clearer requirements."
        );
    }

    #[test]
    fn markers_in_wrong_order_fall_back_to_the_whole_reply() {
        let raw = "Test case notes first\nImproved prompt below\nnever delimited";
        assert_eq!(extract_improved_requirement(raw), raw);
    }

    #[test]
    fn empty_reply_yields_empty_text() {
        assert_eq!(extract_improved_requirement("   "), "");
    }
}
