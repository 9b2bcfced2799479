use anyhow::{Context, Result, anyhow};
use musli::json;
use musli::{Decode, Encode};
use reqwest::blocking::Client;
use std::io::{self, BufReader};
use std::time::Duration;

use crate::diff::PreparedDiff;

use super::stream::read_stream_to_string;
use super::{LlmClient, prompt_builder, truncate};

#[derive(Debug, Encode, Decode)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Encode)]
struct OllamaChatRequest {
    model: String,
    stream: bool,
    messages: Vec<OllamaMessage>,
}

#[derive(Debug, Decode)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Decode)]
struct OllamaStreamResponse {
    message: Option<OllamaMessage>,
    done: Option<bool>,
}

/// Synchronous Ollama client using /api/chat.
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
    stream: bool,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, stream: bool) -> Result<Self> {
        // Local models can take a while to load on first use.
        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            stream,
        })
    }

    /// Internal helper to talk to /api/chat.
    fn chat(&self, system_prompt: String, user_prompt: String) -> Result<String> {
        let req_body = OllamaChatRequest {
            model: self.model.clone(),
            stream: self.stream,
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system_prompt,
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
        };

        let body_str = json::to_string(&req_body)
            .map_err(|e| anyhow!("Failed to encode Ollama JSON request: {e}"))?;

        log::trace!("Ollama request body: {}", truncate(&body_str, 3000));

        let url = format!("{}/api/chat", self.base_url);
        log::info!("Calling Ollama model {:?} at {url}", self.model);

        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str)
            .send()
            .map_err(|e| anyhow!("Error calling Ollama at {url}: {e}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "Ollama API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        if self.stream {
            let reader = BufReader::new(resp);
            return read_stream_to_string(reader, &mut io::stdout(), parse_stream_line);
        }

        let resp_text = resp
            .text()
            .map_err(|e| anyhow!("Failed to read Ollama response body: {e}"))?;

        log::trace!("Ollama raw JSON response: {resp_text}");

        parse_chat_response(&resp_text)
    }
}

fn parse_chat_response(body: &str) -> Result<String> {
    let parsed: OllamaChatResponse =
        json::from_str(body).map_err(|e| anyhow!("Failed to decode Ollama JSON: {e}"))?;

    Ok(parsed.message.content.trim().to_string())
}

fn parse_stream_line(line: &str) -> Result<Option<String>> {
    let parsed: OllamaStreamResponse =
        json::from_str(line).map_err(|e| anyhow!("Failed to decode Ollama stream JSON: {e}"))?;

    if parsed.done.unwrap_or(false) {
        return Ok(None);
    }

    Ok(parsed
        .message
        .map(|m| m.content)
        .filter(|content| !content.is_empty()))
}

impl LlmClient for OllamaClient {
    fn generate_commit_message(
        &self,
        branch: &str,
        diff: &PreparedDiff,
        ticket_summary: Option<&str>,
    ) -> Result<String> {
        let prompts = prompt_builder::commit_message_prompt(branch, diff, ticket_summary);
        self.chat(prompts.system, prompts.user)
    }
}
