//! Cleanup of raw model output.
//!
//! Model completions are pasted straight into `git commit -m` and
//! `gh pr create`, so they have to arrive clean: no markdown fence the
//! model wrapped its answer in, no "AI:" label, no paragraph the model
//! repeated verbatim.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)] // compile-time constant regex pattern
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Normalizes a raw model completion into text safe to hand to git or gh.
///
/// Strips a wrapping triple-backtick fence, removes a leading `AI:` label
/// from each paragraph, collapses paragraphs that exactly duplicate an
/// earlier one (first occurrence wins), and trims the result.
/// Already-clean input passes through unchanged. Never fails.
pub fn sanitize(raw: &str) -> String {
    let text = strip_code_fence(raw.trim());

    let mut paragraphs: Vec<String> = Vec::new();
    for paragraph in PARAGRAPH_BREAK.split(text) {
        let paragraph = strip_ai_label(paragraph);
        if paragraph.is_empty() || paragraphs.contains(&paragraph) {
            continue;
        }
        paragraphs.push(paragraph);
    }

    paragraphs.join("\n\n").trim().to_string()
}

/// Strips a fence wrapping the whole text, keeping the enclosed content.
///
/// The opening fence line may carry a language tag; the closing fence must
/// be the final line. Anything else is returned unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(after_open) = text.strip_prefix("```") else {
        return text;
    };
    let Some(newline) = after_open.find('\n') else {
        return text;
    };
    let Some(body) = after_open[newline + 1..].strip_suffix("```") else {
        return text;
    };
    body.strip_suffix('\n').unwrap_or(body)
}

/// Removes a case-sensitive `AI:` label from the paragraph's first line.
fn strip_ai_label(paragraph: &str) -> String {
    match paragraph.strip_prefix("AI:") {
        Some(rest) => rest.trim_start_matches([' ', '\t']).to_string(),
        None => paragraph.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clean_input_is_unchanged() {
        assert_eq!(sanitize("feat: x"), "feat: x");
        assert_eq!(
            sanitize("feat: x\n\nLonger description\nacross two lines"),
            "feat: x\n\nLonger description\nacross two lines"
        );
    }

    #[test]
    fn strips_wrapping_code_fence() {
        assert_eq!(sanitize("```\nfeat: x\n```"), "feat: x");
    }

    #[test]
    fn strips_fence_with_language_tag() {
        assert_eq!(sanitize("```markdown\nfeat: x\n```"), "feat: x");
    }

    #[test]
    fn fence_with_empty_content_yields_empty_string() {
        assert_eq!(sanitize("```\n```"), "");
    }

    #[test]
    fn unterminated_fence_is_left_alone() {
        assert_eq!(sanitize("```\nfeat: x"), "```\nfeat: x");
    }

    #[test]
    fn strips_ai_label() {
        assert_eq!(sanitize("AI: feat: x"), "feat: x");
    }

    #[test]
    fn ai_label_is_case_sensitive() {
        assert_eq!(sanitize("ai: feat: x"), "ai: feat: x");
    }

    #[test]
    fn collapses_duplicate_paragraphs() {
        assert_eq!(sanitize("feat: x\n\nfeat: x"), "feat: x");
    }

    #[test]
    fn collapses_non_consecutive_duplicates_keeping_first_occurrence() {
        assert_eq!(sanitize("feat: x\n\nbody\n\nfeat: x"), "feat: x\n\nbody");
    }

    #[test]
    fn label_is_stripped_before_duplicate_comparison() {
        assert_eq!(sanitize("AI: feat: x\n\nfeat: x"), "feat: x");
    }

    #[test]
    fn fence_label_and_duplicates_combined() {
        assert_eq!(sanitize("```\nAI: feat: x\n\nfeat: x\n```"), "feat: x");
    }

    #[test]
    fn whitespace_only_input_yields_empty_string() {
        assert_eq!(sanitize("   \n\n  "), "");
    }

    proptest! {
        // Generated text avoids backticks and uppercase so it cannot form
        // fences or "AI:" labels, which are stripped at most once per pass.
        #[test]
        fn idempotent_on_fence_free_text(text in "[a-z][a-z :.\n]{0,120}") {
            let once = sanitize(&text);
            prop_assert_eq!(sanitize(&once), once.clone());
        }

        #[test]
        fn fenced_and_labelled_input_cleans_to_plain_text(body in "[a-z][a-z :]{0,60}") {
            let raw = format!("```\nAI: {body}\n\n{body}\n```");
            prop_assert_eq!(sanitize(&raw), body.trim_end());
        }
    }
}
