//! Fun and LLM commands

use icpulse::{ChatMessage, CommandContext, HandlerError};

use crate::AppState;

const ASK_SYSTEM_PROMPT: &str = "You are a friendly assistant in an Internet Computer \
community chat. Answer concisely; if a question is about live chain data, suggest the \
matching bot command instead of guessing numbers.";

/// Cap LLM answers well under the platform message limit.
const MAX_ANSWER_CHARS: usize = 2_000;

/// `joke` - one random joke from the public joke API.
pub async fn joke(state: &AppState) -> Result<String, HandlerError> {
    let (setup, punchline) = state.jokes.random().await?;
    Ok(format!("{setup}\n\n{punchline}"))
}

/// `ask` - free-form question answered by the configured LLM.
pub async fn ask(state: &AppState, ctx: &CommandContext) -> Result<String, HandlerError> {
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| HandlerError::NotConfigured("ask".to_string()))?;
    let question = ctx.string_arg("question")?;

    let messages = [
        ChatMessage::system(ASK_SYSTEM_PROMPT),
        ChatMessage::user(question),
    ];
    let completion = llm.complete(&messages).await?;
    Ok(truncate_answer(completion.content.trim()))
}

fn truncate_answer(text: &str) -> String {
    if text.chars().count() <= MAX_ANSWER_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_ANSWER_CHARS).collect();
    format!("{cut}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_answers_pass_through() {
        assert_eq!(truncate_answer("hello"), "hello");
    }

    #[test]
    fn long_answers_are_truncated_with_ellipsis() {
        let long = "x".repeat(MAX_ANSWER_CHARS + 50);
        let out = truncate_answer(&long);
        assert_eq!(out.chars().count(), MAX_ANSWER_CHARS + 1);
        assert!(out.ends_with('\u{2026}'));
    }
}
