//! Provider-neutral chat types and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Neither API key environment variable is set (or both are empty).
    #[error("missing API key: neither {primary} nor {fallback} is set")]
    MissingApiKey { primary: &'static str, fallback: &'static str },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be interpreted.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// A single role/content turn sent to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// The assistant turn returned by a chat call, plus usage metadata for
/// logging.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub role: String,
    pub content: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send a chat request to the provider, prefixed with the given system
    /// prompt.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<ChatReply, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
