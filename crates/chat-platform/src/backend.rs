//! HTTP chat backend adapter.
//!
//! `POST {base_url}/chat` with `{ message, session_id }`. No auth header.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use chat_core::ports::{BackendRequest, ChatBackendPort};
use chat_types::{config::BackendConfig, ChatError, Result};
use crate::network_error;

pub struct HttpChatBackend {
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait(?Send)]
impl ChatBackendPort for HttpChatBackend {
    async fn send(&self, req: &BackendRequest) -> Result<Value> {
        let url = self.endpoint();
        log::debug!("POST {} (session {})", url, req.session_id);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(req)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        if !response.ok() {
            return Err(ChatError::Http {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        response.json::<Value>().await.map_err(network_error)
    }
}
