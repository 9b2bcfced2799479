pub mod noop;
pub mod ollama;
pub mod openai;
mod prompt_builder;
mod prompts;
mod stream;

use crate::diff::PreparedDiff;
use anyhow::Result;

pub use prompt_builder::{PromptPair, commit_message_prompt};

/// Trait for talking to an LLM (real backend or dummy).
pub trait LlmClient: Send + Sync {
    /// Generate a commit message from the prepared staged diff.
    fn generate_commit_message(
        &self,
        branch: &str,
        diff: &PreparedDiff,
        ticket_summary: Option<&str>,
    ) -> Result<String>;

    /// Exact token count for `text`, if the backend can provide one.
    /// Callers fall back to [`crate::diff::estimate_tokens`] on `None`.
    fn count_tokens(&self, _text: &str) -> Result<Option<usize>> {
        Ok(None)
    }
}

/// Truncate long strings for debug logging.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some((cut, _)) => format!(
            "{}...\n[truncated {} chars]",
            &s[..cut],
            s.chars().count() - max_len
        ),
    }
}
