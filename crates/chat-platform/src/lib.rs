//! Browser adapters for the chat-core ports.
//!
//! - `backend`: chat backend over `fetch` (gloo-net)
//! - `store`: message history in a PostgREST endpoint, or in memory
//! - `storage`: `localStorage`, or in memory

pub mod backend;
pub mod store;
pub mod storage;

use chat_types::ChatError;
use gloo_utils::errors::JsError;
use wasm_bindgen::JsValue;

/// Map a gloo-net failure to a `ChatError::Network`, keeping only the JS
/// error message (e.g. "Failed to fetch").
pub(crate) fn network_error(e: gloo_net::Error) -> ChatError {
    match e {
        gloo_net::Error::JsError(js) => ChatError::Network(js.message),
        gloo_net::Error::SerdeError(e) => ChatError::Serialization(e.to_string()),
        gloo_net::Error::GlooError(msg) => ChatError::Network(msg),
        #[allow(unreachable_patterns)]
        other => ChatError::Other(other.to_string()),
    }
}

/// Readable message for a thrown JS value.
pub(crate) fn js_error_message(value: JsValue) -> String {
    match JsError::try_from(value) {
        Ok(js) => js.to_string(),
        Err(not_error) => not_error.to_string(),
    }
}
