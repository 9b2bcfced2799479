//! Totals across parsed files.

use super::types::{DiffStats, FileChange};

/// Sum per-file counts. `estimated_tokens` is left at zero; it describes the
/// raw diff text, which callers attach with [`DiffStats::with_estimated_tokens`].
pub fn aggregate(files: &[FileChange]) -> DiffStats {
    let (total_additions, total_deletions) = files
        .iter()
        .fold((0, 0), |(adds, dels), f| (adds + f.additions, dels + f.deletions));

    DiffStats {
        total_files: files.len(),
        total_additions,
        total_deletions,
        total_changes: total_additions + total_deletions,
        estimated_tokens: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, additions: usize, deletions: usize) -> FileChange {
        FileChange {
            additions,
            deletions,
            ..FileChange::new(path)
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(aggregate(&[]), DiffStats::default());
    }

    #[test]
    fn sums_every_file() {
        let files = vec![file("a", 3, 1), file("b", 0, 7), file("c.png", 0, 0)];
        let stats = aggregate(&files);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_additions, 3);
        assert_eq!(stats.total_deletions, 8);
        assert_eq!(stats.total_changes, 11);
        assert_eq!(stats.estimated_tokens, 0);
    }

    #[test]
    fn recomputing_gives_the_same_result() {
        let files = vec![file("a", 2, 2)];
        assert_eq!(aggregate(&files), aggregate(&files));
    }
}
