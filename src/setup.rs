use anyhow::Result;
use log::debug;

use crate::config::{Config, Provider};
use crate::llm::LlmClient;
use crate::llm::noop::NoopClient;
use crate::llm::ollama::OllamaClient;
use crate::llm::openai::OpenAiClient;

/// Build the LLM client based on CLI + config.
pub fn build_llm_client(cfg: &Config) -> Result<Box<dyn LlmClient>> {
    if cfg.no_model {
        debug!("Using NoopClient (no model calls)");
        return Ok(Box::new(NoopClient));
    }

    match cfg.provider {
        Provider::OpenAi => {
            let key = cfg.require_api_key()?;
            debug!(
                "Using OpenAiClient with model {} at {}",
                cfg.model, cfg.api_base_url
            );
            Ok(Box::new(OpenAiClient::new(
                key,
                cfg.model.clone(),
                &cfg.api_base_url,
                cfg.stream,
            )?))
        }
        Provider::Ollama => {
            debug!(
                "Using OllamaClient with model {} at {}",
                cfg.model, cfg.api_base_url
            );
            Ok(Box::new(OllamaClient::new(
                cfg.api_base_url.clone(),
                cfg.model.clone(),
                cfg.stream,
            )?))
        }
    }
}
