use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ChatError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// The bare message shown to the user after `Error: `.
    ///
    /// HTTP failures report only the status text, never the body.
    pub fn detail(&self) -> String {
        let detail = match self {
            ChatError::Store(m)
            | ChatError::Network(m)
            | ChatError::Serialization(m)
            | ChatError::Storage(m)
            | ChatError::Config(m)
            | ChatError::JsInterop(m)
            | ChatError::Other(m) => m.clone(),
            ChatError::Http { status, status_text } => {
                if status_text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    status_text.clone()
                }
            }
            ChatError::Cancelled => "Cancelled".to_string(),
        };
        if detail.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            detail
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
