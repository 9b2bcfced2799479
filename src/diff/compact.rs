//! Bounded text digest of a diff, used in place of the raw diff when the
//! raw text is too large to embed in a prompt.

use std::fmt::Write;

use super::stats::aggregate;
use super::types::{CodeChange, FileChange};

pub const SUMMARY_HEADER: &str = "Summary of large diff (full diff omitted)";

/// Render a digest listing at most `max_lines_per_file` changed lines per file.
/// Context lines and whitespace-only changes are never listed. A cap of zero
/// is treated as one.
pub fn compact(files: &[FileChange], max_lines_per_file: usize) -> String {
    let max_lines = max_lines_per_file.max(1);
    let stats = aggregate(files);

    let mut out = String::new();
    out.push_str(SUMMARY_HEADER);
    out.push('\n');
    out.push_str(&stats.summary_line());
    out.push('\n');

    for file in files {
        render_file(&mut out, file, max_lines);
    }

    out
}

fn render_file(out: &mut String, file: &FileChange, max_lines: usize) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n### {}", file.path);

    if file.is_new {
        out.push_str("New file\n");
    } else if file.is_deleted {
        out.push_str("Deleted\n");
    } else if file.is_renamed {
        let from = file.old_path.as_deref().unwrap_or("unknown");
        let _ = writeln!(out, "Renamed from `{from}`");
    }

    if file.is_binary {
        out.push_str("Binary file\n");
        return;
    }

    let _ = writeln!(out, "Changes: +{} -{}", file.additions, file.deletions);

    let significant: Vec<&CodeChange> = file
        .changes
        .iter()
        .filter(|c| c.is_significant())
        .collect();

    if significant.is_empty() {
        return;
    }

    out.push_str("```diff\n");
    for change in significant.iter().take(max_lines) {
        let _ = writeln!(out, "{}{}", change.kind.marker(), change.text);
    }
    out.push_str("```\n");

    let remaining = significant.len().saturating_sub(max_lines);
    if remaining > 0 {
        let _ = writeln!(out, "... and {remaining} more changes");
    }
}
