//! Structured records produced from a unified diff.

use serde::Serialize;

/// Role a single line plays inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Addition,
    Deletion,
    Context,
}

impl ChangeKind {
    /// Diff marker used when re-rendering the line.
    pub fn marker(&self) -> char {
        match self {
            ChangeKind::Addition => '+',
            ChangeKind::Deletion => '-',
            ChangeKind::Context => ' ',
        }
    }
}

/// One line inside a file's hunk, with the diff marker stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeChange {
    pub kind: ChangeKind,
    pub text: String,
    /// Post-change line number. Deleted lines have no position in the
    /// resulting file, so this is `None` for them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl CodeChange {
    /// A deletion or addition whose text is more than whitespace.
    pub fn is_significant(&self) -> bool {
        self.kind != ChangeKind::Context && !self.text.trim().is_empty()
    }
}

/// One file's section of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Final (b side) path.
    pub path: String,
    /// Previous path, only set for renames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub additions: usize,
    pub deletions: usize,
    pub changes: Vec<CodeChange>,
    pub is_binary: bool,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_renamed: bool,
}

impl FileChange {
    pub fn new(path: impl Into<String>) -> Self {
        FileChange {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Record a line and keep the addition/deletion counters in step with it.
    pub(crate) fn push(&mut self, change: CodeChange) {
        match change.kind {
            ChangeKind::Addition => self.additions += 1,
            ChangeKind::Deletion => self.deletions += 1,
            ChangeKind::Context => {}
        }
        self.changes.push(change);
    }

    pub fn total_changes(&self) -> usize {
        self.additions + self.deletions
    }
}

/// Totals over a set of file changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub total_files: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
    pub total_changes: usize,
    /// Filled from the raw diff text, not from the parsed records.
    pub estimated_tokens: usize,
}

impl DiffStats {
    pub fn with_estimated_tokens(self, estimated_tokens: usize) -> Self {
        DiffStats {
            estimated_tokens,
            ..self
        }
    }

    /// `git diff --stat` style line, e.g. `2 files changed, 1 insertion(+), 3 deletions(-)`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} changed, {} {}(+), {} {}(-)",
            self.total_files,
            plural(self.total_files, "file", "files"),
            self.total_additions,
            plural(self.total_additions, "insertion", "insertions"),
            self.total_deletions,
            plural(self.total_deletions, "deletion", "deletions"),
        )
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
