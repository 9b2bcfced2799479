//! Best-effort unified diff parser.
//!
//! The parser never fails: sections it cannot make sense of are dropped and
//! counted, everything else is turned into [`FileChange`] records in the order
//! the files appear in the diff.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{ChangeKind, CodeChange, FileChange};

/// `diff --git ` at the start of a line opens a file section.
static SECTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^diff --git ").expect("section regex is valid"));

/// `a/<old> b/<new>`, either side optionally double-quoted.
static HEADER_PATHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"?a/(.*?)"? "?b/(.*?)"?$"#).expect("header regex is valid")
});

/// New-side start of a hunk header: the integer right after the first `+`.
static HUNK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@[^+]*\+(\d+)").expect("hunk regex is valid"));

/// Result of a parse, including how many sections had to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub files: Vec<FileChange>,
    /// Non-empty sections whose header yielded no usable path.
    pub skipped_sections: usize,
}

/// Parse a unified diff into per-file change records.
pub fn parse(diff_text: &str) -> Vec<FileChange> {
    parse_with_report(diff_text).files
}

/// Like [`parse`], but also reports how many sections were skipped.
pub fn parse_with_report(diff_text: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for section in split_sections(diff_text) {
        if section.trim().is_empty() {
            continue;
        }

        match parse_section(section) {
            Some(file) => report.files.push(file),
            None => {
                report.skipped_sections += 1;
                log::debug!(
                    "Skipping diff section without a usable header: {:?}",
                    section.lines().next().unwrap_or_default()
                );
            }
        }
    }

    log::trace!(
        "Parsed {} file section(s), skipped {}",
        report.files.len(),
        report.skipped_sections
    );

    report
}

/// Slice the text into the bodies that follow each section marker.
/// Anything before the first marker (e.g. a commit header) is not a section.
fn split_sections(diff_text: &str) -> Vec<&str> {
    let markers: Vec<_> = SECTION_START.find_iter(diff_text).collect();

    markers
        .iter()
        .enumerate()
        .map(|(idx, marker)| {
            let end = markers
                .get(idx + 1)
                .map(|next| next.start())
                .unwrap_or(diff_text.len());
            &diff_text[marker.end()..end]
        })
        .collect()
}

fn parse_section(section: &str) -> Option<FileChange> {
    let mut lines = section.lines();
    let (old_path, new_path) = header_paths(lines.next()?)?;

    let mut file = FileChange::new(new_path);
    if old_path != file.path {
        file.is_renamed = true;
        file.old_path = Some(old_path.to_string());
    }

    let body: Vec<&str> = lines.collect();
    for line in &body {
        apply_status_marker(&mut file, line);
    }

    if file.is_binary {
        return Some(file);
    }

    let builder = body
        .iter()
        .fold(SectionBuilder::new(file), |builder, line| builder.feed(line));

    Some(builder.finish())
}

fn header_paths(header: &str) -> Option<(&str, &str)> {
    let caps = HEADER_PATHS.captures(header.trim_end())?;
    let old_path = caps.get(1)?.as_str();
    let new_path = caps.get(2)?.as_str();

    if new_path.is_empty() {
        return None;
    }

    Some((old_path, new_path))
}

fn apply_status_marker(file: &mut FileChange, line: &str) {
    if line.starts_with("new file mode") {
        file.is_new = true;
        file.is_deleted = false;
    } else if line.starts_with("deleted file mode") {
        file.is_deleted = !file.is_new;
    } else if line.starts_with("Binary files") {
        file.is_binary = true;
    } else if let Some(from) = line.strip_prefix("rename from ") {
        file.is_renamed = true;
        let from = from.trim_matches('"');
        if file.old_path.is_none() && !from.is_empty() && from != file.path {
            file.old_path = Some(from.to_string());
        }
    }
}

/// Accumulator threaded through the lines of one section.
///
/// `next_line` is `None` outside a hunk, and otherwise holds the post-change
/// line number the next addition or context line will receive.
struct SectionBuilder {
    file: FileChange,
    next_line: Option<usize>,
}

impl SectionBuilder {
    fn new(file: FileChange) -> Self {
        SectionBuilder {
            file,
            next_line: None,
        }
    }

    fn feed(mut self, line: &str) -> Self {
        if line.starts_with("@@") {
            // An unreadable header closes the hunk until the next good one.
            self.next_line = hunk_start(line);
            return self;
        }

        let Some(line_number) = self.next_line else {
            return self;
        };

        if let Some(text) = line.strip_prefix('+') {
            if !text.starts_with("++") {
                self.record(ChangeKind::Addition, text, Some(line_number));
                self.advance(line_number);
            }
        } else if let Some(text) = line.strip_prefix('-') {
            if !text.starts_with("--") {
                self.record(ChangeKind::Deletion, text, None);
            }
        } else if let Some(text) = line.strip_prefix(' ') {
            self.record(ChangeKind::Context, text, Some(line_number));
            self.advance(line_number);
        }

        self
    }

    /// Step past `line_number`. A counter that cannot advance closes the hunk.
    fn advance(&mut self, line_number: usize) {
        self.next_line = line_number.checked_add(1);
    }

    fn record(&mut self, kind: ChangeKind, text: &str, line_number: Option<usize>) {
        self.file.push(CodeChange {
            kind,
            text: text.to_string(),
            line_number,
        });
    }

    fn finish(self) -> FileChange {
        self.file
    }
}

fn hunk_start(line: &str) -> Option<usize> {
    HUNK_START
        .captures(line)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
