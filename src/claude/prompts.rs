//! Prompt construction for model queries.

/// Builds the prompt asking for a commit message for the staged changes.
pub fn commit_message(diff: &str) -> String {
    format!(
        "Please write a concise and descriptive commit message for the following changes. \
         Respond with the commit message only, no commentary.\n\n{diff}"
    )
}

/// Builds the prompt asking for a pull request title.
pub fn pr_title(history: &str) -> String {
    format!(
        "Based on the following commit history, generate a concise, descriptive title \
         for a pull request. Respond with the title only, no commentary.\n\n{history}"
    )
}

/// Builds the prompt asking for a pull request description.
pub fn pr_description(history: &str) -> String {
    format!(
        "Based on the following commit history, write a pull request description \
         summarising the changes and their motivation. Respond with the description \
         only, no commentary.\n\n{history}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_their_input() {
        let diff = "diff --git a/file.txt b/file.txt";
        assert!(commit_message(diff).ends_with(diff));

        let history = "abc123 feat: add feature";
        assert!(pr_title(history).ends_with(history));
        assert!(pr_description(history).ends_with(history));
    }

    #[test]
    fn title_and_description_prompts_are_distinct() {
        let history = "abc123 feat: add feature";
        assert_ne!(pr_title(history), pr_description(history));
        assert!(pr_title(history).contains("generate a concise, descriptive title"));
    }
}
