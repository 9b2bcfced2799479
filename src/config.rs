use crate::Cli;
use crate::diff::SummaryPolicy;
use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Which model API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[value(name = "openai")]
    OpenAi,
    Ollama,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Ollama => "llama3.2",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com",
            Provider::Ollama => "http://localhost:11434",
        }
    }
}

/// Final resolved configuration for commitbrief.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub model: String,
    /// Skip model calls entirely (`--no-model` or model `none`).
    pub no_model: bool,
    pub openai_api_key: Option<String>,
    pub api_base_url: String,
    pub stream: bool,
    pub summary: SummaryPolicy,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--model`, `--provider`, ...)
    ///   2. Env vars (`COMMITBRIEF_MODEL`, `COMMITBRIEF_PROVIDER`, `OPENAI_API_KEY`, ...)
    ///   3. TOML `~/.config/commitbrief.toml` (or `--config`)
    ///   4. Provider defaults
    pub fn from_sources(cli: &Cli) -> Result<Self> {
        let file_cfg = match &cli.config {
            Some(path) => Some(load_file_config(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(load_file_config(&path)?),
                _ => None,
            },
        };

        let model_env = env::var("COMMITBRIEF_MODEL").ok();
        Ok(Self::resolve(cli, file_cfg.unwrap_or_default(), model_env))
    }

    fn resolve(cli: &Cli, file_cfg: FileConfig, model_env: Option<String>) -> Self {
        let provider = cli
            .provider
            .or(file_cfg.provider)
            .unwrap_or(Provider::OpenAi);

        let model = cli
            .model
            .clone()
            .or(model_env)
            .or(file_cfg.model)
            .unwrap_or_else(|| provider.default_model().to_string());

        let no_model = cli.no_model || model.eq_ignore_ascii_case("none");

        let api_base_url = cli
            .api_base_url
            .clone()
            .or(file_cfg.api_base_url)
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let mut summary = file_cfg.summary.unwrap_or_default();
        if let Some(max_lines) = cli.max_lines_per_file {
            summary.max_lines_per_file = max_lines;
        }

        Config {
            provider,
            model,
            no_model,
            openai_api_key: cli.api_key.clone().or(file_cfg.openai_api_key),
            api_base_url,
            stream: cli.stream || file_cfg.stream.unwrap_or(false),
            summary,
        }
    }

    /// The OpenAI key, or an error explaining how to provide one.
    pub fn require_api_key(&self) -> Result<String> {
        self.openai_api_key.clone().ok_or_else(|| {
            anyhow!(
                "OPENAI_API_KEY (or --api-key) is required unless --no-model or model=none is used"
            )
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    pub provider: Option<Provider>,
    /// Default model to use when not provided via CLI or env.
    pub model: Option<String>,
    pub openai_api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub stream: Option<bool>,
    /// Large-diff limits and summary size.
    pub summary: Option<SummaryPolicy>,
}

/// Return `~/.config/commitbrief.toml`
fn default_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("commitbrief.toml"))
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    log::debug!("Loaded config from {:?}", path);
    parse_file_config(&data).with_context(|| format!("invalid config file {:?}", path))
}

fn parse_file_config(data: &str) -> Result<FileConfig> {
    Ok(toml::from_str::<FileConfig>(data)?)
}
