use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Author of a message.
///
/// Persisted rows carry the role as a free-form string: `"user"` maps to
/// [`Role::User`] and anything else is treated as the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "user" => Role::User,
            _ => Role::Bot,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// A message row as stored in the hosted store.
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub session_id: String,
    pub role: Role,
    pub content: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub session_id: String,
    pub role: Role,
    pub content: String,
}

impl NewChatMessage {
    pub fn new(session_id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            role,
            content: content.into(),
        }
    }
}

/// A message as held and rendered by the chat view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Only unique enough to key list rows
    pub id: String,
    pub text: String,
    pub sender: Role,
    pub timestamp: DateTime<Utc>,
    /// Suggested replies; never restored from history
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub chips: Vec<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: new_view_id(),
            text: text.into(),
            sender: Role::User,
            timestamp: Utc::now(),
            chips: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>, chips: Vec<String>) -> Self {
        Self {
            id: new_view_id(),
            text: text.into(),
            sender: Role::Bot,
            timestamp: Utc::now(),
            chips,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Role::User
    }
}

impl From<ChatMessage> for Message {
    fn from(row: ChatMessage) -> Self {
        Self {
            id: row.id.unwrap_or_else(new_view_id),
            text: row.content,
            sender: row.role,
            timestamp: row.created_at.unwrap_or_else(Utc::now),
            chips: Vec::new(),
        }
    }
}

fn new_view_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Accepts RFC 3339 and offset-less timestamps (read as UTC).
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
