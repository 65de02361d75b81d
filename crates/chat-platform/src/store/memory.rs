//! In-memory message store.
//! Used when no hosted store is configured; history lasts for the page only.

use std::cell::{Cell, RefCell};
use async_trait::async_trait;
use chrono::Utc;

use chat_core::ports::MessageStorePort;
use chat_types::{
    message::{ChatMessage, Role},
    Result,
};
use super::require_session_id;

pub struct MemoryMessageStore {
    rows: RefCell<Vec<ChatMessage>>,
    next_id: Cell<u64>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self {
            rows: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl MessageStorePort for MemoryMessageStore {
    async fn get_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        require_session_id(session_id)?;
        let mut rows: Vec<ChatMessage> = self
            .rows
            .borrow()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }

    async fn save_message(&self, session_id: &str, role: Role, content: &str) -> Result<ChatMessage> {
        require_session_id(session_id)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let row = ChatMessage {
            id: Some(id.to_string()),
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Some(Utc::now()),
        };
        self.rows.borrow_mut().push(row.clone());
        Ok(row)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
