use super::*;
use std::time::Duration;

fn msg(content: &str, role: Role) -> NewChatMessage {
    NewChatMessage { content: content.to_string(), role }
}

// =========================================================================
// messages
// =========================================================================

#[tokio::test]
async fn save_assigns_unique_ids() {
    let store = MemStorage::new();
    let a = store.save_message(msg("hi", Role::User)).await;
    let b = store.save_message(msg("hi", Role::User)).await;
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn save_preserves_content_and_role() {
    let store = MemStorage::new();
    let stored = store.save_message(msg("show me projects", Role::User)).await;
    assert_eq!(stored.content, "show me projects");
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn history_empty_store() {
    let store = MemStorage::new();
    assert!(store.history().await.is_empty());
}

#[tokio::test]
async fn history_ascending_by_timestamp() {
    let store = MemStorage::new();
    for content in ["one", "two", "three", "four"] {
        store.save_message(msg(content, Role::User)).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let history = store.history().await;
    assert_eq!(history.len(), 4);
    let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three", "four"]);
    for pair in history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn chat_message_serializes_rfc3339_timestamp() {
    let message = ChatMessage {
        id: Uuid::new_v4(),
        content: "hello".to_string(),
        role: Role::Assistant,
        timestamp: time::macros::datetime!(2025-06-01 12:30:45 UTC),
    };
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["timestamp"], "2025-06-01T12:30:45Z");
    assert_eq!(json["role"], "assistant");

    let restored: ChatMessage = serde_json::from_value(json).unwrap();
    assert_eq!(restored.timestamp, message.timestamp);
    assert_eq!(restored.role, Role::Assistant);
}

// =========================================================================
// users
// =========================================================================

#[tokio::test]
async fn create_user_and_get_by_id() {
    let store = MemStorage::new();
    let user = store
        .create_user(NewUser { username: "arjun".to_string(), password: "hunter2".to_string() })
        .await
        .unwrap();

    let found = store.get_user(user.id).await.unwrap();
    assert_eq!(found.username, "arjun");
}

#[tokio::test]
async fn get_user_by_username() {
    let store = MemStorage::new();
    store
        .create_user(NewUser { username: "arjun".to_string(), password: "hunter2".to_string() })
        .await
        .unwrap();

    assert!(store.get_user_by_username("arjun").await.is_some());
    assert!(store.get_user_by_username("nobody").await.is_none());
}

#[tokio::test]
async fn create_user_rejects_duplicate_username() {
    let store = MemStorage::new();
    store
        .create_user(NewUser { username: "arjun".to_string(), password: "a".to_string() })
        .await
        .unwrap();

    let err = store
        .create_user(NewUser { username: "arjun".to_string(), password: "b".to_string() })
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::UsernameTaken(name) if name == "arjun"));
}

#[tokio::test]
async fn get_unknown_user_is_none() {
    let store = MemStorage::new();
    assert!(store.get_user(Uuid::new_v4()).await.is_none());
}

// =========================================================================
// role
// =========================================================================

#[test]
fn role_parse_accepts_only_the_closed_set() {
    assert_eq!(Role::parse("user"), Some(Role::User));
    assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
    assert_eq!(Role::parse("system"), Some(Role::System));
    assert_eq!(Role::parse("admin"), None);
    assert_eq!(Role::parse("User"), None);
}

#[test]
fn role_as_str_round_trips() {
    for role in [Role::User, Role::Assistant, Role::System] {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
}
