//! Commit message generation from staged git changes.
//!
//! The [`diff`] module holds the pure diff-to-summary pipeline; everything
//! else is the command-line host around it (config, git, model clients).

pub mod cli_args;
pub mod config;
pub mod diff;
pub mod git;
pub mod llm;
pub mod logging;
pub mod setup;

pub use cli_args::{Cli, Command};
pub use diff::{PreparedDiff, SummaryPolicy, prepare};
