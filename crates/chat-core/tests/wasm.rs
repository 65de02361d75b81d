//! WASM-target tests for chat-core.
//!
//! Runs the formatter, reply parsing, and a controller round trip under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::controller::{ChatController, LoadingState, SendOutcome};
use chat_core::event_bus::EventBus;
use chat_core::format::{format_markup, Segment};
use chat_core::ports::*;
use chat_core::reply::BotReply;
use chat_core::session::SessionManager;
use chat_types::message::*;
use chat_types::{ChatError, Result};

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct KvStorage(RefCell<HashMap<String, String>>);

#[async_trait(?Send)]
impl StoragePort for KvStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "kv"
    }
}

struct EmptyStore;

#[async_trait(?Send)]
impl MessageStorePort for EmptyStore {
    async fn get_history(&self, _session_id: &str) -> Result<Vec<ChatMessage>> {
        Ok(Vec::new())
    }

    async fn save_message(&self, _session_id: &str, _role: Role, _content: &str) -> Result<ChatMessage> {
        Err(ChatError::Store("read-only".to_string()))
    }

    fn backend_name(&self) -> &str {
        "empty"
    }
}

struct FixedBackend(Result<Value>);

#[async_trait(?Send)]
impl ChatBackendPort for FixedBackend {
    async fn send(&self, _req: &BackendRequest) -> Result<Value> {
        self.0.clone()
    }
}

fn controller(backend: FixedBackend) -> ChatController {
    ChatController::new(
        SessionManager::new(Rc::new(KvStorage(RefCell::new(HashMap::new())))),
        Rc::new(EmptyStore),
        Rc::new(backend),
        EventBus::new(),
    )
}

#[wasm_bindgen_test]
fn format_mixed() {
    assert_eq!(
        format_markup("hello **world** *foo*"),
        vec![
            Segment::Plain("hello "),
            Segment::Emphasis("world"),
            Segment::Plain(" "),
            Segment::Emphasis("foo"),
            Segment::Plain(""),
        ]
    );
}

#[wasm_bindgen_test]
fn reply_fallbacks() {
    assert_eq!(BotReply::from_body(&json!({"reply": "hi"})).text, "hi");
    let reply = BotReply::from_body(&json!({"message": "hey", "chips": ["a", "b"]}));
    assert_eq!(reply.text, "hey");
    assert_eq!(reply.chips, vec!["a", "b"]);
}

#[wasm_bindgen_test]
async fn controller_send_and_clear() {
    let ctrl = controller(FixedBackend(Ok(json!({"reply": "hi"}))));
    ctrl.initialize().await;
    let before = ctrl.session_id().unwrap();

    assert_eq!(ctrl.send("hello").await, Some(SendOutcome::Replied));
    assert_eq!(ctrl.messages().len(), 2);
    assert_eq!(ctrl.loading(), LoadingState::Idle);

    let after = ctrl.clear().await;
    assert_ne!(after.id, before);
    assert!(ctrl.messages().is_empty());
}

#[wasm_bindgen_test]
async fn controller_http_error() {
    let ctrl = controller(FixedBackend(Err(ChatError::Http {
        status: 500,
        status_text: "Internal Server Error".to_string(),
    })));
    ctrl.initialize().await;
    assert_eq!(ctrl.send("hello").await, Some(SendOutcome::Failed));
    assert_eq!(ctrl.messages()[1].text, "Error: Internal Server Error");
}
