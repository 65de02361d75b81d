//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Tests the in-memory adapters and URL construction under
//! wasm32-unknown-unknown via `wasm-pack test --node`.
//!
//! localStorage and the HTTP adapters need a browser and a live server.

use wasm_bindgen_test::*;

use chat_platform::backend::HttpChatBackend;
use chat_platform::storage::{detect_storage, MemoryStorage};
use chat_platform::store::{connect_store, MemoryMessageStore, RestMessageStore};
use chat_core::ports::{MessageStorePort, StoragePort};
use chat_types::config::{BackendConfig, StoreConfig};
use chat_types::message::Role;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    assert_eq!(MemoryStorage::new().backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_get_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("chatSessionId", "session_1_aaaaaaaaa").await.unwrap();
    storage.set("chatSessionId", "session_2_bbbbbbbbb").await.unwrap();
    assert_eq!(
        storage.get("chatSessionId").await.unwrap().as_deref(),
        Some("session_2_bbbbbbbbb")
    );
}

#[wasm_bindgen_test]
async fn memory_storage_delete_and_exists() {
    let storage = MemoryStorage::new();
    storage.set("key", "val").await.unwrap();
    assert!(storage.exists("key").await.unwrap());
    storage.delete("key").await.unwrap();
    assert!(!storage.exists("key").await.unwrap());
    storage.delete("key").await.unwrap();
}

#[wasm_bindgen_test]
fn detect_storage_falls_back_without_window() {
    // Node has no `window`
    assert_eq!(detect_storage().backend_name(), "memory");
}

// ─── MemoryMessageStore Tests ────────────────────────────

#[wasm_bindgen_test]
async fn memory_store_assigns_id_and_timestamp() {
    let store = MemoryMessageStore::new();
    let row = store.save_message("s1", Role::User, "hello").await.unwrap();
    assert_eq!(row.id.as_deref(), Some("1"));
    assert!(row.created_at.is_some());
    assert_eq!(row.role, Role::User);
    assert_eq!(store.len(), 1);
}

#[wasm_bindgen_test]
async fn memory_store_history_is_per_session_and_ordered() {
    let store = MemoryMessageStore::new();
    store.save_message("s1", Role::User, "a").await.unwrap();
    store.save_message("s2", Role::User, "other").await.unwrap();
    store.save_message("s1", Role::Bot, "b").await.unwrap();

    let history = store.get_history("s1").await.unwrap();
    let texts: Vec<&str> = history.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
    assert!(history.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[wasm_bindgen_test]
async fn memory_store_empty_content_allowed() {
    let store = MemoryMessageStore::new();
    let row = store.save_message("s1", Role::Bot, "").await.unwrap();
    assert!(row.content.is_empty());
}

#[wasm_bindgen_test]
async fn memory_store_rejects_empty_session() {
    let store = MemoryMessageStore::new();
    assert!(store.get_history("").await.is_err());
    assert!(store.save_message(" ", Role::User, "x").await.is_err());
    assert!(store.is_empty());
}

#[wasm_bindgen_test]
async fn memory_store_unknown_session_is_empty() {
    let store = MemoryMessageStore::new();
    assert!(store.get_history("nobody").await.unwrap().is_empty());
}

// ─── URL construction ────────────────────────────────────

#[wasm_bindgen_test]
fn backend_endpoint() {
    let backend = HttpChatBackend::new(&BackendConfig {
        base_url: "https://api.example.com/".to_string(),
    });
    assert_eq!(backend.endpoint(), "https://api.example.com/chat");
}

#[wasm_bindgen_test]
fn rest_store_table_url() {
    let store = RestMessageStore::new(&StoreConfig {
        url: "https://db.example.com/".to_string(),
        anon_key: "anon".to_string(),
        table: "chat_messages".to_string(),
    });
    assert_eq!(store.table_url(), "https://db.example.com/rest/v1/chat_messages");
    assert_eq!(store.backend_name(), "rest");
}

#[wasm_bindgen_test]
fn connect_store_picks_backend() {
    assert_eq!(connect_store(&StoreConfig::default()).backend_name(), "memory");
    let configured = StoreConfig {
        url: "https://db.example.com".to_string(),
        anon_key: "anon".to_string(),
        ..StoreConfig::default()
    };
    assert_eq!(connect_store(&configured).backend_name(), "rest");
}
