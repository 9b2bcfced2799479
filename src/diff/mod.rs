//! Diff-to-summary pipeline.
//!
//! Raw unified diff text goes in; out comes either the same text or, when the
//! change set is too large, a compact digest, together with the stats the
//! prompt builder needs. Everything here is pure and never fails.

pub mod classify;
pub mod compact;
pub mod parser;
pub mod stats;
pub mod tokens;
pub mod types;

use serde::{Deserialize, Serialize};

pub use classify::{LargeReason, Thresholds, is_large};
pub use compact::compact;
pub use parser::{ParseReport, parse, parse_with_report};
pub use stats::aggregate;
pub use tokens::{TokenCount, estimate_tokens, resolve_token_count};
pub use types::{ChangeKind, CodeChange, DiffStats, FileChange};

pub const DEFAULT_MAX_LINES_PER_FILE: usize = 10;

/// Size policy for turning a diff into prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPolicy {
    #[serde(flatten)]
    pub thresholds: Thresholds,
    pub max_lines_per_file: usize,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        SummaryPolicy {
            thresholds: Thresholds::default(),
            max_lines_per_file: DEFAULT_MAX_LINES_PER_FILE,
        }
    }
}

/// Text ready to embed in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedDiff {
    /// The raw diff, or the compact summary when `is_large`.
    pub text: String,
    pub is_large: bool,
    pub stats: DiffStats,
    /// Sections dropped because no file path could be read from them.
    pub skipped_sections: usize,
}

/// Parse, measure, and if needed compact a raw diff.
pub fn prepare(raw_diff: &str, policy: &SummaryPolicy) -> PreparedDiff {
    let ParseReport {
        files,
        skipped_sections,
    } = parse_with_report(raw_diff);
    let stats = aggregate(&files).with_estimated_tokens(estimate_tokens(raw_diff));

    match policy.thresholds.exceeded(raw_diff, &files) {
        Some(reason) => {
            log::info!("Diff is large ({reason}); sending a compact summary instead");
            PreparedDiff {
                text: compact(&files, policy.max_lines_per_file),
                is_large: true,
                stats,
                skipped_sections,
            }
        }
        None => {
            log::debug!(
                "Diff fits as-is: {} (~{} tokens)",
                stats.summary_line(),
                stats.estimated_tokens
            );
            PreparedDiff {
                text: raw_diff.to_string(),
                is_large: false,
                stats,
                skipped_sections,
            }
        }
    }
}
