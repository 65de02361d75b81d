//! Message store over a PostgREST-style endpoint (e.g. a hosted Postgres
//! exposed at `{url}/rest/v1/{table}`).
//!
//! Authenticates with the project's public key in both the `apikey` header
//! and a bearer token. Rows are filtered by `session_id` and ordered by
//! `created_at` server-side.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};

use chat_core::ports::MessageStorePort;
use chat_types::{
    config::StoreConfig,
    message::{ChatMessage, NewChatMessage, Role},
    ChatError, Result,
};
use crate::network_error;
use super::require_session_id;

pub struct RestMessageStore {
    base_url: String,
    api_key: String,
    table: String,
}

impl RestMessageStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
            table: config.table.clone(),
        }
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }
}

#[async_trait(?Send)]
impl MessageStorePort for RestMessageStore {
    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        require_session_id(session_id)?;
        let filter = format!("eq.{}", session_id);

        let response = self
            .authorize(Request::get(&self.table_url()))
            .query([
                ("select", "*"),
                ("session_id", filter.as_str()),
                ("order", "created_at.asc"),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let response = ensure_ok(response).await?;
        response
            .json::<Vec<ChatMessage>>()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))
    }

    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<ChatMessage> {
        require_session_id(session_id)?;
        let row = NewChatMessage::new(session_id, role, content);

        let response = self
            .authorize(Request::post(&self.table_url()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&row)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        let response = ensure_ok(response).await?;
        let mut inserted = response
            .json::<Vec<ChatMessage>>()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))?;

        if inserted.is_empty() {
            return Err(ChatError::Store("insert returned no rows".to_string()));
        }
        Ok(inserted.swap_remove(0))
    }

    fn backend_name(&self) -> &str {
        "rest"
    }
}

/// Turn a non-2xx response into a `ChatError::Store` carrying the body,
/// which for PostgREST holds the database error message.
async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| response.status_text());
    Err(ChatError::Store(format!("HTTP {}: {}", status, body)))
}
