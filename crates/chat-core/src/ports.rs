//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use chat_types::{
    Result,
    message::{ChatMessage, Role},
};

// ─── Message Store Port ──────────────────────────────────────

/// Append-only message history, keyed by session id.
#[async_trait(?Send)]
pub trait MessageStorePort {
    /// All rows for a session, oldest first
    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Insert one row; the store assigns `id` and `created_at`
    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<ChatMessage>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Chat Backend Port ───────────────────────────────────────

/// Body of a request to the chat backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub message: String,
    pub session_id: String,
}

#[async_trait(?Send)]
pub trait ChatBackendPort {
    /// Send one user message and return the decoded JSON body.
    ///
    /// Non-2xx responses must come back as `ChatError::Http` carrying the
    /// status text; the body of a failed response is not read.
    async fn send(&self, req: &BackendRequest) -> Result<Value>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Small string key-value store that survives page reloads.
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
