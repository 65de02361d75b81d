//! WASM-target tests for chat-types.
//!
//! Mirrors the native unit tests that touch the clock and RNG, which go
//! through `js` / `wasmbind` shims under wasm32-unknown-unknown.
//! Run with `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_types::message::*;
use chat_types::session::*;
use chat_types::error::*;

#[wasm_bindgen_test]
fn session_generate_is_well_formed() {
    let session = Session::generate();
    assert!(is_well_formed(&session.id), "bad id: {}", session.id);
}

#[wasm_bindgen_test]
fn session_generate_differs() {
    assert_ne!(Session::generate().id, Session::generate().id);
}

#[wasm_bindgen_test]
fn message_user_has_id_and_timestamp() {
    let msg = Message::user("hi");
    assert!(!msg.id.is_empty());
    assert!(msg.timestamp.timestamp_millis() > 0);
}

#[wasm_bindgen_test]
fn chat_message_row_roundtrip() {
    let json = r#"{"id":"1","session_id":"s","role":"user","content":"a","created_at":"2026-01-01T00:00:00Z"}"#;
    let row: ChatMessage = serde_json::from_str(json).unwrap();
    assert_eq!(row.role, Role::User);
    let msg = Message::from(row);
    assert_eq!(msg.text, "a");
}

#[wasm_bindgen_test]
fn error_detail_for_http() {
    let err = ChatError::Http { status: 500, status_text: "Internal Server Error".to_string() };
    assert_eq!(err.detail(), "Internal Server Error");
}
