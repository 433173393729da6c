use super::*;
use crate::state::test_helpers::{self, MockLlm};
use crate::storage::Role;
use crate::view::ViewType;
use serde_json::json;
use std::sync::Arc;

// =========================================================================
// validate_request
// =========================================================================

#[test]
fn validate_accepts_well_formed_body() {
    let body = json!({ "messages": [
        { "role": "user", "content": "hi" },
        { "role": "assistant", "content": "hello" },
    ]});
    let turns = validate_request(&body).unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[1].role, Role::Assistant);
}

#[test]
fn validate_rejects_missing_messages_field() {
    let err = validate_request(&json!({})).unwrap_err();
    let ChatError::Validation(details) = err else { panic!("expected validation error") };
    assert_eq!(details, vec!["messages: field is required"]);
}

#[test]
fn validate_rejects_non_array_messages() {
    let err = validate_request(&json!({ "messages": "hello" })).unwrap_err();
    let ChatError::Validation(details) = err else { panic!("expected validation error") };
    assert!(details[0].contains("expected an array"));
}

#[test]
fn validate_rejects_empty_messages() {
    let err = validate_request(&json!({ "messages": [] })).unwrap_err();
    assert!(matches!(err, ChatError::Validation(details) if !details.is_empty()));
}

#[test]
fn validate_rejects_unknown_role_with_detail() {
    let body = json!({ "messages": [{ "role": "admin", "content": "hi" }] });
    let err = validate_request(&body).unwrap_err();
    let ChatError::Validation(details) = err else { panic!("expected validation error") };
    assert_eq!(details.len(), 1);
    assert!(details[0].contains("messages[0].role"));
    assert!(details[0].contains("admin"));
}

#[test]
fn validate_rejects_non_string_content() {
    let body = json!({ "messages": [{ "role": "user", "content": 42 }] });
    let err = validate_request(&body).unwrap_err();
    let ChatError::Validation(details) = err else { panic!("expected validation error") };
    assert!(details[0].contains("messages[0].content"));
}

#[test]
fn validate_collects_every_violation() {
    let body = json!({ "messages": [
        { "role": "admin", "content": 42 },
        { "role": "user", "content": "fine" },
        { "content": "no role" },
    ]});
    let err = validate_request(&body).unwrap_err();
    let ChatError::Validation(details) = err else { panic!("expected validation error") };
    assert_eq!(details.len(), 3);
}

// =========================================================================
// handle_chat
// =========================================================================

fn user_body(content: &str) -> serde_json::Value {
    json!({ "messages": [{ "role": "user", "content": content }] })
}

#[tokio::test]
async fn chat_returns_assistant_reply() {
    let mock = Arc::new(MockLlm::new(vec!["Nice to meet you!"]));
    let state = test_helpers::test_app_state_with_llm(mock.clone());

    let outcome = handle_chat(&state, &user_body("hello")).await.unwrap();
    assert_eq!(outcome.reply.role, "assistant");
    assert_eq!(outcome.reply.content, "Nice to meet you!");
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn chat_without_key_never_calls_provider() {
    let state = test_helpers::test_app_state();

    let err = handle_chat(&state, &user_body("hello")).await.unwrap_err();
    assert!(matches!(err, ChatError::NotConfigured));
    assert_eq!(err.to_string(), MISSING_KEY_ERROR);
    assert!(state.storage.history().await.is_empty());
}

#[tokio::test]
async fn chat_validation_runs_before_configuration_check() {
    let state = test_helpers::test_app_state();
    let err = handle_chat(&state, &json!({ "messages": "bad" })).await.unwrap_err();
    assert!(matches!(err, ChatError::Validation(_)));
}

#[tokio::test]
async fn chat_stores_last_user_turn_and_reply() {
    let mock = Arc::new(MockLlm::new(vec!["He built three projects."]));
    let state = test_helpers::test_app_state_with_llm(mock);

    let body = json!({ "messages": [
        { "role": "assistant", "content": "earlier reply" },
        { "role": "user", "content": "what has he built?" },
    ]});
    handle_chat(&state, &body).await.unwrap();

    let history = state.storage.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "what has he built?");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "He built three projects.");
}

#[tokio::test]
async fn two_chats_store_four_messages_ascending() {
    let mock = Arc::new(MockLlm::new(vec!["first reply", "second reply"]));
    let state = test_helpers::test_app_state_with_llm(mock);

    handle_chat(&state, &user_body("one")).await.unwrap();
    handle_chat(&state, &user_body("two")).await.unwrap();

    let history = state.storage.history().await;
    assert_eq!(history.len(), 4);
    for pair in history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "first reply", "two", "second reply"]);
}

#[tokio::test]
async fn chat_surfaces_reply_side_view_hint() {
    let mock = Arc::new(MockLlm::new(vec!["His technical skills cover React and Rust."]));
    let state = test_helpers::test_app_state_with_llm(mock);

    let outcome = handle_chat(&state, &user_body("what can he do?")).await.unwrap();
    assert_eq!(outcome.view, Some(ViewType::Skills));
}

#[tokio::test]
async fn chat_view_hint_absent_without_keywords() {
    let mock = Arc::new(MockLlm::new(vec!["He is great."]));
    let state = test_helpers::test_app_state_with_llm(mock);

    let outcome = handle_chat(&state, &user_body("is he good?")).await.unwrap();
    assert_eq!(outcome.view, None);
}

#[tokio::test]
async fn empty_provider_reply_is_an_error_and_stores_nothing() {
    let mock = Arc::new(MockLlm::new(vec![""]));
    let state = test_helpers::test_app_state_with_llm(mock);

    let err = handle_chat(&state, &user_body("hello")).await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyReply));
    assert!(state.storage.history().await.is_empty());
}

#[test]
fn system_prompt_mentions_the_sections() {
    for section in ["projects", "resume", "skills", "certificates"] {
        assert!(SYSTEM_PROMPT.contains(section), "missing {section}");
    }
}
