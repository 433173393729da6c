//! Groq API client (OpenAI-compatible chat completions).

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmConfig;
use super::types::{ChatReply, LlmChat, LlmError, Message};

/// Sampling temperature for the portfolio assistant.
const TEMPERATURE: f64 = 0.7;
/// Completion cap; the assistant is prompted to keep answers concise.
const MAX_TOKENS: u32 = 500;

pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqClient {
    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails
    /// to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }

    /// Return the configured model name (e.g. `"llama-3.3-70b-versatile"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_json(&self, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl LlmChat for GroqClient {
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<ChatReply, LlmError> {
        let msgs = build_messages(system, messages);
        let body = CcRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: &msgs,
        };
        let text = self.send_json(&body).await?;
        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: &'a [CcMessage],
}

#[derive(Serialize)]
struct CcMessage {
    role: String,
    content: String,
}

fn build_messages(system: &str, messages: &[Message]) -> Vec<CcMessage> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system".to_string(), content: system.to_string() });
    }
    for message in messages {
        out.push(CcMessage { role: message.role.clone(), content: message.content.clone() });
    }
    out
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_response(json_text: &str) -> Result<ChatReply, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let prompt_tokens = root
        .get("usage")
        .and_then(|u| u.get("prompt_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let completion_tokens = root
        .get("usage")
        .and_then(|u| u.get("completion_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };

    // A choice without a message yields an empty reply; the relay surfaces
    // that as its own error rather than a parse failure.
    let message = choice.get("message").cloned().unwrap_or(Value::Null);
    let role = message
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or("assistant")
        .to_string();
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(ChatReply { role, content, model, input_tokens: prompt_tokens, output_tokens: completion_tokens })
}

#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;
