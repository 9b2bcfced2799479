use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read};
use std::time::Duration;

use commitbrief::config::Config;
use commitbrief::diff::{self, PreparedDiff};
use commitbrief::llm::LlmClient;
use commitbrief::{Cli, Command, git, logging, setup};

/// Read the diff to work on: stdin when asked, otherwise the staged changes.
fn read_diff(cli: &Cli) -> Result<String> {
    if cli.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read diff from stdin")?;
        return Ok(buf);
    }

    if cli.all {
        git::stage_all()?;
    }
    git::staged_diff()
}

/// Branch name for the prompt. A piped diff may not come from a repository.
fn branch_name(cli: &Cli) -> Result<String> {
    match git::current_branch() {
        Ok(name) => Ok(name),
        Err(err) if cli.stdin => {
            log::info!("No branch available for piped diff: {err:#}");
            Ok("unknown".to_string())
        }
        Err(err) => Err(err),
    }
}

/// Inspect mode: show what the model would receive, without calling it.
fn run_inspect(prepared: &PreparedDiff, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(prepared).context("failed to encode JSON")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", prepared.stats.summary_line().as_str().bold());
    println!("Estimated tokens: {}", prepared.stats.estimated_tokens);
    println!(
        "Large diff: {}",
        if prepared.is_large { "yes (compact summary below)" } else { "no" }
    );
    println!("----------------------------------");
    println!("{}", prepared.text.trim_end());
    Ok(())
}

/// Default mode: one-shot commit message from the prepared staged diff.
fn run_commit(cli: &Cli, cfg: &Config, prepared: &PreparedDiff) -> Result<()> {
    let llm = setup::build_llm_client(cfg)?;
    let branch = branch_name(cli)?;

    let exact = llm.count_tokens(&prepared.text).unwrap_or_else(|err| {
        log::warn!("Token count unavailable, estimating instead: {err:#}");
        None
    });
    let tokens = diff::resolve_token_count(&prepared.text, exact);
    log::info!(
        "Sending {} to the model: {} ({} tokens{})",
        if prepared.is_large { "compact summary" } else { "full diff" },
        prepared.stats.summary_line(),
        tokens.value(),
        if tokens.is_exact() { "" } else { ", estimated" }
    );

    let streaming = cfg.stream && !cfg.no_model;
    let commit_message = if streaming {
        generate(llm.as_ref(), &branch, prepared, cli.ticket_summary.as_deref())?
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Generating commit message...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = generate(llm.as_ref(), &branch, prepared, cli.ticket_summary.as_deref());
        spinner.finish_and_clear();
        result?
    };

    if !streaming {
        println!();
        println!("{}", "----- Commit Message Preview -----".bold());
        println!("{commit_message}");
        println!("{}", "----------------------------------".bold());
    }

    if cli.apply {
        let path = git::write_commit_editmsg(&commit_message)?;
        println!("Commit message written to {}", path.display());
    }

    Ok(())
}

fn generate(
    llm: &dyn LlmClient,
    branch: &str,
    prepared: &PreparedDiff,
    ticket_summary: Option<&str>,
) -> Result<String> {
    llm.generate_commit_message(branch, prepared, ticket_summary)
        .context("failed to generate commit message")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli)?;

    let raw = read_diff(&cli)?;
    if raw.trim().is_empty() {
        println!("No staged changes found.");
        return Ok(());
    }

    let prepared = diff::prepare(&raw, &cfg.summary);
    if prepared.skipped_sections > 0 {
        log::warn!(
            "{} diff section(s) could not be parsed and are left out of the stats",
            prepared.skipped_sections
        );
    }

    match &cli.command {
        Some(Command::Inspect { json }) => run_inspect(&prepared, *json),
        None => run_commit(&cli, &cfg, &prepared),
    }
}
