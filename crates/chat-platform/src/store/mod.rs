pub mod rest;
pub mod memory;

pub use rest::RestMessageStore;
pub use memory::MemoryMessageStore;

use std::rc::Rc;
use chat_core::ports::MessageStorePort;
use chat_types::{config::StoreConfig, ChatError, Result};

fn require_session_id(session_id: &str) -> Result<()> {
    if session_id.trim().is_empty() {
        return Err(ChatError::Store("session id is empty".to_string()));
    }
    Ok(())
}

/// REST store when configured, otherwise a page-lifetime memory store.
pub fn connect_store(config: &StoreConfig) -> Rc<dyn MessageStorePort> {
    if config.is_configured() {
        log::info!("Message store: REST ({})", config.url);
        Rc::new(RestMessageStore::new(config))
    } else {
        log::warn!("Message store not configured; history will not survive a reload");
        Rc::new(MemoryMessageStore::new())
    }
}
