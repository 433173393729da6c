//! Groq configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Primary API key variable.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
/// Legacy fallback, kept for parity with older deployments.
pub const API_KEY_FALLBACK_VAR: &str = "GROQ_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GROQ_API_KEY` (or legacy `GROQ_KEY`); empty values count as unset
    ///
    /// Optional:
    /// - `GROQ_MODEL`: default `llama-3.3-70b-versatile`
    /// - `GROQ_BASE_URL`: default Groq OpenAI-compatible base URL
    /// - `GROQ_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GROQ_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no key variable is set.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build config from an arbitrary variable lookup (tests pass a map so
    /// they never mutate process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = [API_KEY_VAR, API_KEY_FALLBACK_VAR]
            .iter()
            .find_map(|var| lookup(var).filter(|v| !v.is_empty()))
            .ok_or(LlmError::MissingApiKey { primary: API_KEY_VAR, fallback: API_KEY_FALLBACK_VAR })?;

        let model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string());
        let base_url = lookup("GROQ_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: parse_u64(&lookup, "GROQ_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(&lookup, "GROQ_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
