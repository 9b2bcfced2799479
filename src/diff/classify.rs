//! Size classification: when a diff is too large to send verbatim.

use serde::{Deserialize, Serialize};

use super::tokens::estimate_tokens;
use super::types::FileChange;

/// Limits past which a diff is considered too large to send verbatim.
/// Each limit is exclusive: a diff sitting exactly on one is not large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub max_files: usize,
    pub max_changes: usize,
    pub max_tokens: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            max_files: 50,
            max_changes: 500,
            max_tokens: 15_000,
        }
    }
}

/// Which limit a large diff went over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeReason {
    TooManyFiles(usize),
    TooManyChanges(usize),
    TooManyTokens(usize),
}

impl std::fmt::Display for LargeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LargeReason::TooManyFiles(n) => write!(f, "{n} files changed"),
            LargeReason::TooManyChanges(n) => write!(f, "{n} changed lines"),
            LargeReason::TooManyTokens(n) => write!(f, "~{n} tokens of diff text"),
        }
    }
}

impl Thresholds {
    /// First limit exceeded, checked in files, changes, tokens order.
    pub fn exceeded(&self, raw_diff: &str, files: &[FileChange]) -> Option<LargeReason> {
        if files.len() > self.max_files {
            return Some(LargeReason::TooManyFiles(files.len()));
        }

        let changes: usize = files.iter().map(FileChange::total_changes).sum();
        if changes > self.max_changes {
            return Some(LargeReason::TooManyChanges(changes));
        }

        let tokens = estimate_tokens(raw_diff);
        if tokens > self.max_tokens {
            return Some(LargeReason::TooManyTokens(tokens));
        }

        None
    }

    pub fn is_large(&self, raw_diff: &str, files: &[FileChange]) -> bool {
        self.exceeded(raw_diff, files).is_some()
    }
}

/// Classify with the default limits (50 files, 500 changes, 15000 tokens).
pub fn is_large(raw_diff: &str, files: &[FileChange]) -> bool {
    Thresholds::default().is_large(raw_diff, files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_files(count: usize) -> Vec<FileChange> {
        (0..count)
            .map(|i| FileChange::new(format!("file_{i}.txt")))
            .collect()
    }

    fn file_with(additions: usize, deletions: usize) -> FileChange {
        FileChange {
            additions,
            deletions,
            ..FileChange::new("big.rs")
        }
    }

    #[test]
    fn fifty_files_is_not_large_but_fifty_one_is() {
        assert!(!is_large("short", &empty_files(50)));
        assert!(is_large("short", &empty_files(51)));
        assert_eq!(
            Thresholds::default().exceeded("short", &empty_files(51)),
            Some(LargeReason::TooManyFiles(51))
        );
    }

    #[test]
    fn change_count_is_summed_across_files() {
        let at_limit = vec![file_with(250, 0), file_with(0, 250)];
        assert!(!is_large("", &at_limit));

        let over = vec![file_with(250, 1), file_with(0, 250)];
        assert_eq!(
            Thresholds::default().exceeded("", &over),
            Some(LargeReason::TooManyChanges(501))
        );
    }

    #[test]
    fn token_estimate_of_raw_text_counts() {
        // 37_500 chars is exactly 15_000 estimated tokens.
        let at_limit = "x".repeat(37_500);
        assert!(!is_large(&at_limit, &[]));

        let over = "x".repeat(37_501);
        assert_eq!(
            Thresholds::default().exceeded(&over, &[]),
            Some(LargeReason::TooManyTokens(15_001))
        );
    }

    #[test]
    fn custom_limits_are_respected() {
        let tight = Thresholds {
            max_files: 1,
            max_changes: 3,
            max_tokens: 10,
        };
        assert!(tight.is_large("", &empty_files(2)));
        assert!(tight.is_large("", &[file_with(2, 2)]));
        assert!(tight.is_large(&"y".repeat(26), &[]));
        assert!(!tight.is_large(&"y".repeat(25), &[file_with(1, 2)]));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Thresholds = toml::from_str("max_files = 5").expect("valid toml");
        assert_eq!(parsed.max_files, 5);
        assert_eq!(parsed.max_changes, 500);
        assert_eq!(parsed.max_tokens, 15_000);
    }
}
