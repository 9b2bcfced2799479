use crate::diff::PreparedDiff;
use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the commit-message prompt. Small diffs are embedded verbatim in a
/// `diff` fence; large ones arrive as the compact summary with a note telling
/// the model what it is looking at.
pub fn commit_message_prompt(
    branch: &str,
    diff: &PreparedDiff,
    ticket_summary: Option<&str>,
) -> PromptPair {
    let mut system = prompts::SYSTEM_INSTRUCTIONS.to_owned();
    if diff.is_large {
        system.push_str("\n\n");
        system.push_str(prompts::LARGE_DIFF_NOTE);
    }
    if let Some(ts) = ticket_summary {
        system.push_str("\nOverall ticket goal: ");
        system.push_str(ts);
    }

    let body = if diff.is_large {
        format!("Condensed summary:\n\n{}", diff.text)
    } else {
        format!("Diff:\n```diff\n{}\n```", diff.text.trim_end())
    };

    let stats = diff.stats.summary_line();
    let user = format!("Branch: {branch}\nStats: {stats}\n\n{body}");

    PromptPair { system, user }
}
