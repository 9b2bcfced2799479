use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};

use crate::config::Provider;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "commitbrief",
    version,
    about = "LLM-assisted Git commit message generator that compacts large diffs"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// If set, write the generated message into .git/COMMIT_EDITMSG (no commit is created)
    #[arg(long, global = true)]
    pub apply: bool,

    /// Read the diff from stdin instead of `git diff --cached`
    #[arg(long, global = true, conflicts_with = "all")]
    pub stdin: bool,

    /// Stage all new, modified, and deleted files before reading the diff
    #[arg(long, global = true)]
    pub all: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Model backend to talk to
    #[arg(long, value_enum, env = "COMMITBRIEF_PROVIDER", global = true)]
    pub provider: Option<Provider>,

    /// Model name to use (e.g. gpt-4o-mini). If 'none', acts like --no-model.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable model calls; return a dummy message instead
    #[arg(long, global = true)]
    pub no_model: bool,

    /// API key (otherwise uses OPENAI_API_KEY env var)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the model API (OpenAI-compatible server or Ollama)
    #[arg(long, env = "COMMITBRIEF_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Print the model response as it arrives
    #[arg(long, global = true)]
    pub stream: bool,

    /// Optional: a brief human description of the ticket, passed to the model
    #[arg(long, global = true)]
    pub ticket_summary: Option<String>,

    /// Changed lines listed per file when a large diff is summarized
    #[arg(long, global = true)]
    pub max_lines_per_file: Option<usize>,

    /// Config file to use instead of ~/.config/commitbrief.toml
    #[arg(long, env = "COMMITBRIEF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand (e.g. 'inspect')
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands, e.g. `commitbrief inspect --json`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show what would be sent to the model (raw diff or compact summary) without calling it
    Inspect {
        /// Emit the prepared diff and its stats as JSON
        #[arg(long)]
        json: bool,
    },
}
