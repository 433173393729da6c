//! Conversation and user storage.
//!
//! DESIGN
//! ======
//! `Storage` is an injectable trait so the backing store can be swapped
//! without touching the chat relay (in-memory for tests and local runs, a
//! durable store later). `MemStorage` keeps everything in process memory
//! behind `tokio::sync::RwLock`; a restart discards all history.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

// =============================================================================
// ROLE
// =============================================================================

/// Who authored a chat turn. Closed set, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }

    /// Parse a wire-format role string. Returns `None` for anything outside
    /// the three-value set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A stored chat turn. Immutable once saved; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub role: Role,
    /// RFC 3339 (ISO-8601) on the wire.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Insert shape for a chat turn; id and timestamp are assigned on save.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub content: String,
    pub role: Role,
}

/// A registered user. No auth flow reads these yet; the records exist so the
/// store contract covers them.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

/// Insert shape for a user; the id is assigned on create.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("username already taken: {0}")]
    UsernameTaken(String),
}

// =============================================================================
// STORAGE TRAIT
// =============================================================================

/// Key-value store for chat turns and users. Implementations must be safe to
/// share across handlers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a chat turn, assigning a fresh id and the current timestamp.
    async fn save_message(&self, message: NewChatMessage) -> ChatMessage;

    /// All stored turns, ascending by timestamp. No pagination.
    async fn history(&self) -> Vec<ChatMessage>;

    async fn get_user(&self, id: Uuid) -> Option<User>;

    async fn get_user_by_username(&self, username: &str) -> Option<User>;

    /// Create a user. Usernames are unique.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UsernameTaken`] on a duplicate username.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;
}

// =============================================================================
// IN-MEMORY BACKING
// =============================================================================

/// Process-lifetime in-memory store. No eviction, no durability.
pub struct MemStorage {
    messages: RwLock<HashMap<Uuid, StoredMessage>>,
    users: RwLock<HashMap<Uuid, User>>,
    seq: AtomicU64,
}

/// Map value wrapper. The sequence number breaks timestamp ties so history
/// order stays insertion-stable.
struct StoredMessage {
    seq: u64,
    message: ChatMessage,
}

impl MemStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn save_message(&self, message: NewChatMessage) -> ChatMessage {
        let stored = ChatMessage {
            id: Uuid::new_v4(),
            content: message.content,
            role: message.role,
            timestamp: OffsetDateTime::now_utc(),
        };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let mut messages = self.messages.write().await;
        messages.insert(stored.id, StoredMessage { seq, message: stored.clone() });
        stored
    }

    async fn history(&self) -> Vec<ChatMessage> {
        let messages = self.messages.read().await;
        let mut entries: Vec<(u64, ChatMessage)> =
            messages.values().map(|s| (s.seq, s.message.clone())).collect();
        entries.sort_by_key(|(seq, m)| (m.timestamp, *seq));
        entries.into_iter().map(|(_, m)| m).collect()
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        let users = self.users.read().await;
        users.get(&id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let users = self.users.read().await;
        users.values().find(|u| u.username == username).cloned()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(StorageError::UsernameTaken(user.username));
        }
        let stored = User { id: Uuid::new_v4(), username: user.username, password: user.password };
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
