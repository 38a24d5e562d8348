//! Prompt templates for answer generation

/// Prompt builder for TDS questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the answer prompt
    ///
    /// Context is cut to its first `context_chars` characters. The image line
    /// is omitted when there is no image description.
    pub fn build_answer_prompt(
        question: &str,
        context: &str,
        image_context: &str,
        context_chars: usize,
    ) -> String {
        let image_line = if image_context.is_empty() {
            String::new()
        } else {
            format!("{}\n", image_context)
        };

        format!(
            r#"You are a TDS course Teaching Assistant at IIT Madras.

Context: {context}
{image_line}
Student Question: {question}

Provide a helpful, specific answer for this TDS student. Keep it concise but informative."#,
            context = truncate_chars(context, context_chars),
            image_line = image_line,
            question = question
        )
    }
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let prompt = PromptBuilder::build_answer_prompt(
            "How do I activate venv?",
            "Course Material: Python setup",
            "",
            500,
        );

        assert!(prompt.starts_with("You are a TDS course Teaching Assistant at IIT Madras."));
        assert!(prompt.contains(
            "Context: Course Material: Python setup\n\nStudent Question: How do I activate venv?"
        ));
        assert!(prompt.ends_with("Keep it concise but informative."));
    }

    #[test]
    fn test_context_truncated() {
        let context = "x".repeat(800);
        let prompt = PromptBuilder::build_answer_prompt("q", &context, "", 500);

        assert!(prompt.contains(&"x".repeat(500)));
        assert!(!prompt.contains(&"x".repeat(501)));
    }

    #[test]
    fn test_image_line_included() {
        let prompt = PromptBuilder::build_answer_prompt(
            "What does this error mean?",
            "General TDS course information available.",
            "Image provided (PNG, 2048 bytes). Screenshot or diagram related to TDS question.",
            500,
        );
        assert!(prompt.contains("available.\nImage provided (PNG, 2048 bytes)."));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
