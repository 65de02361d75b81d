use serde::{Deserialize, Serialize};
use crate::{ChatError, Result};

pub const DEFAULT_TABLE: &str = "chat_messages";

/// Top-level client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    pub store: StoreConfig,
    pub backend: BackendConfig,
    /// Save user messages and bot replies to the store from the client.
    /// Off by default: the backend receives `session_id` and persists itself.
    #[serde(default)]
    pub persist_messages: bool,
}

/// Hosted message store (PostgREST-style endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Empty means same origin
    pub base_url: String,
}

impl ChatConfig {
    /// Read configuration baked in at build time.
    ///
    /// A browser bundle has no process environment, so values come from
    /// `CHAT_*` variables present when the crate is compiled.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "CHAT_STORE_URL" => option_env!("CHAT_STORE_URL"),
            "CHAT_STORE_KEY" => option_env!("CHAT_STORE_KEY"),
            "CHAT_STORE_TABLE" => option_env!("CHAT_STORE_TABLE"),
            "CHAT_BACKEND_URL" => option_env!("CHAT_BACKEND_URL"),
            "CHAT_PERSIST_MESSAGES" => option_env!("CHAT_PERSIST_MESSAGES"),
            _ => None,
        })
    }

    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let get = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());
        let defaults = StoreConfig::default();
        Self {
            store: StoreConfig {
                url: trim_base(get("CHAT_STORE_URL").unwrap_or_default()),
                anon_key: get("CHAT_STORE_KEY").unwrap_or_default().to_string(),
                table: get("CHAT_STORE_TABLE")
                    .map(String::from)
                    .unwrap_or(defaults.table),
            },
            backend: BackendConfig {
                base_url: trim_base(get("CHAT_BACKEND_URL").unwrap_or_default()),
            },
            persist_messages: get("CHAT_PERSIST_MESSAGES")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
        }
    }

    /// Reject half-filled settings. An empty backend URL is allowed and
    /// means the page's own origin (`/chat`).
    pub fn validate(&self) -> Result<()> {
        let has_url = !self.store.url.trim().is_empty();
        let has_key = !self.store.anon_key.trim().is_empty();
        if has_url != has_key {
            return Err(ChatError::Config(
                "store URL and key must be set together".to_string(),
            ));
        }
        if self.store.table.trim().is_empty() {
            return Err(ChatError::Config("store table name is empty".to_string()));
        }
        Ok(())
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
