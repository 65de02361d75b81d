//! Session manager: owns the per-browser session id.
//!
//! The id lives in local storage under [`SESSION_STORAGE_KEY`] so a reload
//! lands in the same conversation. Storage failures never block the chat:
//! a failed read is treated as "no session yet" and a failed write keeps the
//! id for the lifetime of the page only.

use std::rc::Rc;
use chat_types::session::Session;
use crate::ports::StoragePort;

pub const SESSION_STORAGE_KEY: &str = "chatSessionId";

pub struct SessionManager {
    storage: Rc<dyn StoragePort>,
}

impl SessionManager {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Return the stored session, creating and persisting one if absent.
    pub async fn resolve_or_create(&self) -> Session {
        match self.storage.get(SESSION_STORAGE_KEY).await {
            Ok(Some(id)) if !id.trim().is_empty() => {
                log::debug!("Resumed session {}", id);
                return Session::new(id);
            }
            Ok(_) => {}
            Err(e) => log::warn!("Could not read session id ({}), starting a new one", e),
        }

        let session = Session::generate();
        self.persist(&session).await;
        log::info!("Created session {}", session.id);
        session
    }

    /// Replace the stored session with a new one.
    /// Rows already written under the old id stay in the store.
    pub async fn reset(&self, previous: Option<&Session>) -> Session {
        let mut session = Session::generate();
        while previous.is_some_and(|p| p.id == session.id) {
            session = Session::generate();
        }
        self.persist(&session).await;
        log::info!("Reset to session {}", session.id);
        session
    }

    async fn persist(&self, session: &Session) {
        if let Err(e) = self.storage.set(SESSION_STORAGE_KEY, &session.id).await {
            log::warn!(
                "Could not persist session id to {} storage: {}",
                self.storage.backend_name(),
                e
            );
        }
    }
}
