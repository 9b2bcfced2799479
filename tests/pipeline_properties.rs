use commitbrief::diff::{
    ChangeKind, FileChange, SummaryPolicy, aggregate, compact, estimate_tokens, is_large, parse,
    prepare,
};
use proptest::prelude::*;

/// One hunk body line: 0 = context, 1 = addition, 2 = deletion, 3 = no-newline marker.
fn hunk_line() -> impl Strategy<Value = (u8, String)> {
    (0u8..4, "[a-z0-9 (){};]{0,16}")
}

fn render_file(idx: usize, hunks: &[(usize, Vec<(u8, String)>)]) -> String {
    let mut out = format!(
        "diff --git a/src/f{idx}.rs b/src/f{idx}.rs\n--- a/src/f{idx}.rs\n+++ b/src/f{idx}.rs\n"
    );
    for (start, lines) in hunks {
        out.push_str(&format!("@@ -{start},9 +{start},9 @@\n"));
        for (kind, text) in lines {
            let line = match kind {
                0 => format!(" {text}"),
                1 => format!("+{text}"),
                2 => format!("-{text}"),
                _ => "\\ No newline at end of file".to_string(),
            };
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn diff_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::collection::vec((1usize..500, prop::collection::vec(hunk_line(), 0..20)), 0..4),
        0..6,
    )
    .prop_map(|files| {
        files
            .iter()
            .enumerate()
            .map(|(idx, hunks)| render_file(idx, hunks))
            .collect()
    })
}

fn count_kind(file: &FileChange, kind: ChangeKind) -> usize {
    file.changes.iter().filter(|c| c.kind == kind).count()
}

proptest! {
    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = parse(&input);
    }

    #[test]
    fn parse_tolerates_diff_shaped_noise(input in "(diff --git |@@ |[+ -]|new file mode|Binary files|rename from )?[ -~]{0,30}(\n[+ @a-z-]{0,12}){0,30}") {
        for file in parse(&input) {
            prop_assert!(!file.path.is_empty());
            prop_assert!(!(file.is_new && file.is_deleted));
        }
    }

    #[test]
    fn counts_match_recorded_changes(diff in diff_strategy()) {
        for file in parse(&diff) {
            prop_assert_eq!(file.additions, count_kind(&file, ChangeKind::Addition));
            prop_assert_eq!(file.deletions, count_kind(&file, ChangeKind::Deletion));
            if file.is_binary {
                prop_assert!(file.changes.is_empty());
            }
        }
    }

    #[test]
    fn line_numbers_increase_within_a_hunk(start in 1usize..1000, lines in prop::collection::vec(hunk_line(), 0..40)) {
        let diff = render_file(0, &[(start, lines)]);
        let files = parse(&diff);
        prop_assert_eq!(files.len(), 1);

        let numbers: Vec<usize> = files[0].changes.iter().filter_map(|c| c.line_number).collect();
        for pair in numbers.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        if let Some(first) = numbers.first() {
            prop_assert_eq!(*first, start);
        }
        for change in &files[0].changes {
            prop_assert_eq!(change.line_number.is_none(), change.kind == ChangeKind::Deletion);
        }
    }

    #[test]
    fn hunks_near_the_counter_limit_never_wrap(back in 0usize..20, lines in prop::collection::vec(hunk_line(), 0..40)) {
        let start = usize::MAX - back;
        let diff = render_file(0, &[(start, lines)]);
        let files = parse(&diff);
        prop_assert_eq!(files.len(), 1);

        let numbers: Vec<usize> = files[0].changes.iter().filter_map(|c| c.line_number).collect();
        for pair in numbers.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert!(numbers.iter().all(|n| *n >= start));
    }

    #[test]
    fn aggregate_is_a_plain_sum(diff in diff_strategy()) {
        let files = parse(&diff);
        let stats = aggregate(&files);

        prop_assert_eq!(stats.total_files, files.len());
        prop_assert_eq!(stats.total_changes, stats.total_additions + stats.total_deletions);
        prop_assert_eq!(stats.total_additions, files.iter().map(|f| f.additions).sum::<usize>());
        prop_assert_eq!(stats, aggregate(&files));
    }

    #[test]
    fn estimate_grows_with_length(a in ".{0,200}", b in ".{0,200}") {
        let joined = format!("{a}{b}");
        prop_assert!(estimate_tokens(&a) <= estimate_tokens(&joined));
    }

    #[test]
    fn compact_respects_the_line_cap(diff in diff_strategy(), cap in 1usize..6) {
        let files = parse(&diff);
        let text = compact(&files, cap);
        let stats = aggregate(&files);

        prop_assert!(text.contains(&stats.summary_line()));

        // Every fenced block holds at most `cap` lines.
        let mut in_fence = false;
        let mut fenced = 0;
        for line in text.lines() {
            if line == "```diff" {
                in_fence = true;
                fenced = 0;
            } else if line == "```" {
                prop_assert!(fenced <= cap);
                in_fence = false;
            } else if in_fence {
                fenced += 1;
            }
        }
        prop_assert!(text.matches("more changes").count() <= files.len());
    }

    #[test]
    fn prepare_only_rewrites_large_diffs(diff in diff_strategy()) {
        let prepared = prepare(&diff, &SummaryPolicy::default());
        let files = parse(&diff);

        prop_assert_eq!(prepared.is_large, is_large(&diff, &files));
        prop_assert_eq!(prepared.stats.estimated_tokens, estimate_tokens(&diff));
        if !prepared.is_large {
            prop_assert_eq!(prepared.text, diff);
        }
    }
}

#[test]
fn fifty_one_empty_files_are_large_on_count_alone() {
    let diff: String = (0..51)
        .map(|i| format!("diff --git a/empty_{i} b/empty_{i}\nnew file mode 100644\n"))
        .collect();
    let files = parse(&diff);

    assert_eq!(files.len(), 51);
    assert_eq!(aggregate(&files).total_changes, 0);
    assert!(estimate_tokens(&diff) < 15_000);
    assert!(is_large(&diff, &files));
}
