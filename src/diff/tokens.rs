//! Cheap token-count heuristic.

use serde::Serialize;

/// Characters per token assumed for diff content, which tokenizes denser
/// than prose.
pub const CHARS_PER_TOKEN: f64 = 2.5;

/// Estimate the token count of `text` as `ceil(chars / 2.5)`.
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    // ceil(chars / 2.5) == ceil(2 * chars / 5), kept in integers.
    (chars * 2).div_ceil(5)
}

/// A token count, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "tokens", rename_all = "snake_case")]
pub enum TokenCount {
    Exact(usize),
    Estimated(usize),
}

impl TokenCount {
    pub fn value(&self) -> usize {
        match self {
            TokenCount::Exact(n) | TokenCount::Estimated(n) => *n,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, TokenCount::Exact(_))
    }
}

/// Prefer an exact count from the model backend, falling back to the estimate.
pub fn resolve_token_count(text: &str, exact: Option<usize>) -> TokenCount {
    match exact {
        Some(n) => TokenCount::Exact(n),
        None => TokenCount::Estimated(estimate_tokens(text)),
    }
}
