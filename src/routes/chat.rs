//! Chat relay routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use serde_json::Value;

use crate::services::chat::{self, ChatError};
use crate::state::AppState;
use crate::storage::{ChatMessage, Role};
use crate::view::ViewType;

#[derive(Serialize)]
pub struct ReplyBody {
    pub role: Role,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatResponseBody {
    pub reply: ReplyBody,
    /// Reply-side view-routing hint; `null` when no phrase matched.
    pub view: Option<ViewType>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct HistoryResponseBody {
    pub history: Vec<ChatMessage>,
}

/// `POST /api/chat` — relay a message sequence to the completion provider.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ChatResponseBody>, (StatusCode, Json<ErrorBody>)> {
    let outcome = chat::handle_chat(&state, &body)
        .await
        .map_err(chat_error_to_response)?;

    let role = Role::parse(&outcome.reply.role).unwrap_or(Role::Assistant);
    Ok(Json(ChatResponseBody {
        reply: ReplyBody { role, content: outcome.reply.content },
        view: outcome.view,
    }))
}

/// `GET /api/chat/history` — full conversation log, ascending by timestamp.
pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponseBody> {
    Json(HistoryResponseBody { history: state.storage.history().await })
}

pub(crate) fn chat_error_to_response(err: ChatError) -> (StatusCode, Json<ErrorBody>) {
    match err {
        ChatError::Validation(details) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody { error: "Invalid request format".to_string(), details: Some(details) }),
        ),
        ChatError::NotConfigured | ChatError::Llm(_) | ChatError::EmptyReply => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { error: err.to_string(), details: None }),
        ),
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
