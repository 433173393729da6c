//! Chat relay service: validate, forward to the provider, record both turns.
//!
//! DESIGN
//! ======
//! Single-pass flow matching the original portfolio endpoint: shape
//! validation first, then the fixed portfolio system prompt is prepended and
//! the turns are forwarded verbatim. No retry and no streaming; the provider
//! call is the only suspension point. On success the last user turn and the
//! assistant turn are appended to the conversation store.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm::types::{ChatReply, Message};
use crate::state::AppState;
use crate::storage::{NewChatMessage, Role};
use crate::view::{self, ViewType};

/// Fixed system context for the portfolio assistant. Always the first turn
/// sent to the provider; never stored in history.
pub const SYSTEM_PROMPT: &str = "You are Arjun's AI Portfolio Assistant. You help visitors learn about Arjun Kumar, a Full Stack Developer and AI Enthusiast.

Key information about Arjun:
- Full Stack Developer with expertise in React, Node.js, Python
- AI enthusiast with experience in OpenAI API, TensorFlow, Langchain
- Has built projects like AI Interview Coach, E-commerce Analytics Dashboard, Smart Task Manager
- Proficient in frontend (React.js 95%, TypeScript 90%, Next.js 88%) and backend (Node.js 92%, Python 85%, PostgreSQL 80%)
- Has certifications from AWS, Google Cloud, and Meta
- Can be contacted via GitHub, LinkedIn, or email

When users ask about projects, resume, skills, or certificates, you can suggest they view those sections. Be helpful, professional, and enthusiastic about Arjun's work. Keep responses concise but informative.

If users ask to see specific sections, mention that you're updating the view for them.";

/// Fixed message for the missing-key 500. The provider is never contacted in
/// that state.
pub const MISSING_KEY_ERROR: &str =
    "Groq API key not configured. Please set GROQ_API_KEY environment variable.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{}", MISSING_KEY_ERROR)]
    NotConfigured,

    /// Request shape violations; each entry names one offending field.
    #[error("Invalid request format")]
    Validation(Vec<String>),

    #[error("{0}")]
    Llm(#[from] crate::llm::types::LlmError),

    /// The provider answered but the choice carried no message content.
    #[error("No response received from AI")]
    EmptyReply,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A validated role/content turn from the request body.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Validate the `{messages: [{role, content}]}` request shape. Collects
/// every violation so the 400 response can report them all at once.
///
/// # Errors
///
/// Returns [`ChatError::Validation`] with a non-empty detail list on any
/// shape violation.
pub fn validate_request(body: &Value) -> Result<Vec<Turn>, ChatError> {
    let Some(messages) = body.get("messages") else {
        return Err(ChatError::Validation(vec!["messages: field is required".to_string()]));
    };
    let Some(items) = messages.as_array() else {
        return Err(ChatError::Validation(vec!["messages: expected an array".to_string()]));
    };
    if items.is_empty() {
        return Err(ChatError::Validation(vec!["messages: expected at least one message".to_string()]));
    }

    let mut details = Vec::new();
    let mut turns = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let role = match item.get("role").and_then(Value::as_str) {
            Some(raw) => match Role::parse(raw) {
                Some(role) => Some(role),
                None => {
                    details.push(format!(
                        "messages[{index}].role: expected one of 'user', 'assistant', 'system', got '{raw}'"
                    ));
                    None
                }
            },
            None => {
                details.push(format!("messages[{index}].role: expected a string"));
                None
            }
        };
        let content = match item.get("content").and_then(Value::as_str) {
            Some(text) => Some(text.to_string()),
            None => {
                details.push(format!("messages[{index}].content: expected a string"));
                None
            }
        };
        if let (Some(role), Some(content)) = (role, content) {
            turns.push(Turn { role, content });
        }
    }

    if details.is_empty() { Ok(turns) } else { Err(ChatError::Validation(details)) }
}

// =============================================================================
// RELAY
// =============================================================================

/// Result of a relayed chat: the assistant reply plus the reply-side view
/// hint for the client.
#[derive(Debug)]
pub struct ChatOutcome {
    pub reply: ChatReply,
    pub view: Option<ViewType>,
}

/// Handle one chat request end to end.
///
/// # Errors
///
/// Returns a [`ChatError`] on validation failure, missing configuration, or
/// any provider failure. Nothing is stored unless the provider answered.
pub async fn handle_chat(state: &AppState, body: &Value) -> Result<ChatOutcome, ChatError> {
    let turns = validate_request(body)?;

    let Some(llm) = state.llm.as_ref() else {
        warn!("chat request refused: Groq API key not configured");
        return Err(ChatError::NotConfigured);
    };

    let last_turn = turns.last().cloned();
    if let Some(view) = last_turn.as_ref().and_then(|t| view::route_for_input(&t.content)) {
        info!(?view, "input-side view hint");
    }

    let messages: Vec<Message> = turns
        .iter()
        .map(|t| Message { role: t.role.as_str().to_string(), content: t.content.clone() })
        .collect();

    let reply = llm.chat(SYSTEM_PROMPT, &messages).await?;
    info!(
        model = %reply.model,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        "chat relay: provider reply"
    );
    if reply.content.is_empty() {
        return Err(ChatError::EmptyReply);
    }

    // Store the last user turn and the assistant turn, in that order, with
    // save-time timestamps so history ordering holds.
    if let Some(last) = last_turn {
        state
            .storage
            .save_message(NewChatMessage { content: last.content, role: last.role })
            .await;
    }
    let reply_role = Role::parse(&reply.role).unwrap_or(Role::Assistant);
    state
        .storage
        .save_message(NewChatMessage { content: reply.content.clone(), role: reply_role })
        .await;

    let view = view::route_for_reply(&reply.content);
    Ok(ChatOutcome { reply, view })
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
