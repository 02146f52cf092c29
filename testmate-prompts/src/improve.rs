//! Requirement-improvement prompt.
//!
//! The first stage of the flow: before test cases are generated, the raw
//! user story can be sent to a model for rewording. The instruction is a
//! single fixed sentence around the quoted requirement.

/// Build the instruction asking a model to improve a raw requirement.
///
/// Pure and total, like [`build_prompt`](crate::build_prompt): the
/// requirement is embedded verbatim, quoted.
pub fn build_improve_prompt(requirement: &str) -> String {
    format!("Please improve this user story or requirement:\n\n\"{requirement}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn requirement_is_quoted_after_the_instruction() {
        let prompt = build_improve_prompt("Users can log in with email");
        assert_eq!(
            prompt,
            "Please improve this user story or requirement:\n\n\"Users can log in with email\""
        );
    }

    #[test]
    fn empty_requirement_still_builds_a_prompt() {
        let prompt = build_improve_prompt("");
        assert!(prompt.starts_with("Please improve"));
        assert!(prompt.ends_with("\"\""));
    }
}
