use super::LlmClient;
use crate::diff::PreparedDiff;
use anyhow::Result;

/// No-op / dummy model client for development with --no-model or model=none.
pub struct NoopClient;

impl LlmClient for NoopClient {
    fn generate_commit_message(
        &self,
        branch: &str,
        diff: &PreparedDiff,
        ticket_summary: Option<&str>,
    ) -> Result<String> {
        let mut msg = String::new();
        msg.push_str("Dummy commit message for testing\n\n");
        msg.push_str(&format!("Branch: {branch}\n"));
        if let Some(ts) = ticket_summary {
            msg.push_str(&format!("Ticket: {ts}\n"));
        }
        msg.push_str(&format!("Stats: {}\n", diff.stats.summary_line()));
        msg.push_str(&format!(
            "Input: {} (~{} tokens)\n",
            if diff.is_large { "compact summary" } else { "full diff" },
            diff.stats.estimated_tokens
        ));
        msg.push_str("\n(LLM disabled)");
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{SummaryPolicy, prepare};

    #[test]
    fn dummy_message_reports_stats() {
        let prepared = prepare("", &SummaryPolicy::default());
        let msg = NoopClient
            .generate_commit_message("main", &prepared, Some("JIRA-1"))
            .expect("noop never fails");

        assert!(msg.contains("Branch: main\nTicket: JIRA-1\n"));
        assert!(msg.contains("Stats: 0 files changed, 0 insertions(+), 0 deletions(-)"));
        assert!(msg.contains("Input: full diff (~0 tokens)"));
        assert_eq!(NoopClient.count_tokens("abc").expect("default hook"), None);
    }
}
