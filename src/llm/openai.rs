use super::stream::read_stream_to_string;
use super::{LlmClient, prompt_builder, truncate};
use crate::diff::PreparedDiff;
use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::io::{self, BufReader};
use std::time::Duration;

/// Minimal request/response structs for OpenAI Chat Completions API.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// OpenAI-compatible implementation of LlmClient.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
    stream: bool,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, api_base_url: &str, stream: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .context("failed to build HTTP client")?;

        Ok(OpenAiClient {
            client,
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            stream,
        })
    }

    fn chat_url(&self) -> String {
        chat_url(&self.api_base_url)
    }

    fn call_chat(&self, req: &ChatRequest) -> Result<String> {
        let url = self.chat_url();

        log::info!(
            "{} OpenAI model {:?}",
            if req.stream { "Streaming" } else { "Calling" },
            &req.model
        );

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .context("failed to send request to OpenAI")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "OpenAI API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        if req.stream {
            let reader = BufReader::new(resp);
            return read_stream_to_string(reader, &mut io::stdout(), parse_stream_line);
        }

        let chat_resp: ChatResponse = resp.json().context("failed to parse OpenAI response")?;

        if let Some(usage) = &chat_resp.usage {
            log::info!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        chat_resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow!("no choices returned from OpenAI"))
    }
}

/// `/v1/chat/completions` under the base URL, whether or not it already ends in `/v1`.
fn chat_url(base: &str) -> String {
    if base.ends_with("/v1") {
        format!("{}/chat/completions", base)
    } else {
        format!("{}/v1/chat/completions", base)
    }
}

/// Parse one server-sent-events line into its content delta, if any.
fn parse_stream_line(line: &str) -> Result<Option<String>> {
    let Some(data) = line.trim_start().strip_prefix("data:") else {
        return Ok(None);
    };

    let data = data.trim();
    if data == "[DONE]" {
        return Ok(None);
    }

    let chunk: StreamResponse =
        serde_json::from_str(data).context("failed to parse OpenAI streaming chunk")?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content))
}

impl LlmClient for OpenAiClient {
    fn generate_commit_message(
        &self,
        branch: &str,
        diff: &PreparedDiff,
        ticket_summary: Option<&str>,
    ) -> Result<String> {
        let prompts = prompt_builder::commit_message_prompt(branch, diff, ticket_summary);

        log::debug!("Commit-message prompt:\n{}", truncate(&prompts.user, 3000));

        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: prompts.system,
                },
                ChatMessage {
                    role: "user".into(),
                    content: prompts.user,
                },
            ],
            stream: self.stream,
        };

        self.call_chat(&req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_handles_both_base_forms() {
        assert_eq!(
            chat_url("https://api.openai.com"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            chat_url("http://localhost:8080/v1"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn stream_lines_yield_deltas() {
        let line = r#"data: {"choices":[{"delta":{"content":"Fix"}}]}"#;
        assert_eq!(parse_stream_line(line).expect("valid chunk"), Some("Fix".into()));

        let role_only = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_stream_line(role_only).expect("valid chunk"), None);

        assert_eq!(parse_stream_line("data: [DONE]").expect("done marker"), None);
        assert_eq!(parse_stream_line(": keep-alive").expect("comment"), None);
    }

    #[test]
    fn malformed_stream_chunk_is_an_error() {
        assert!(parse_stream_line("data: {not json").is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let client = OpenAiClient::new("k".into(), "m".into(), "http://host/v1/", false)
            .expect("client builds");
        assert_eq!(client.chat_url(), "http://host/v1/chat/completions");
    }
}
