//! Chat controller: owns the conversation shown in the view.
//!
//! Lifecycle:
//! 1. `initialize` resolves the session and loads its stored history (once)
//! 2. `begin_send` appends the user message and marks a reply as pending
//! 3. `complete_send` calls the backend and appends the reply or an error
//! 4. `clear` drops the conversation, cancels any pending reply, and starts
//!    a new session
//!
//! All state sits behind `RefCell`s and no borrow is held across an await,
//! so the controller can be shared via `Rc` with `spawn_local` tasks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use chat_types::{
    event::ChatEvent,
    message::{ChatMessage, Message, Role},
    session::Session,
};
use crate::event_bus::EventBus;
use crate::ports::{BackendRequest, ChatBackendPort, MessageStorePort};
use crate::reply::BotReply;
use crate::session::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    WaitingForReply,
}

/// Conversation state owned by the controller
#[derive(Debug, Clone)]
pub struct ChatState {
    pub session: Option<Session>,
    pub messages: Vec<Message>,
    pub loading: LoadingState,
}

impl ChatState {
    fn new() -> Self {
        Self {
            session: None,
            messages: Vec::new(),
            loading: LoadingState::Idle,
        }
    }
}

/// A send accepted by [`ChatController::begin_send`], waiting for its reply.
pub struct PendingSend {
    request: BackendRequest,
    registration: AbortRegistration,
}

impl PendingSend {
    pub fn request(&self) -> &BackendRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The backend answered and its reply was appended
    Replied,
    /// An `Error: ...` message was appended in place of a reply
    Failed,
    /// The conversation was cleared first; the reply was discarded
    Cancelled,
}

pub struct ChatController {
    sessions: SessionManager,
    store: Rc<dyn MessageStorePort>,
    backend: Rc<dyn ChatBackendPort>,
    event_bus: EventBus,
    persist_messages: bool,
    state: RefCell<ChatState>,
    in_flight: RefCell<Option<AbortHandle>>,
    initialized: Cell<bool>,
}

impl ChatController {
    pub fn new(
        sessions: SessionManager,
        store: Rc<dyn MessageStorePort>,
        backend: Rc<dyn ChatBackendPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            sessions,
            store,
            backend,
            event_bus,
            persist_messages: false,
            state: RefCell::new(ChatState::new()),
            in_flight: RefCell::new(None),
            initialized: Cell::new(false),
        }
    }

    /// Also write sent messages and replies to the store.
    pub fn with_persistence(mut self, persist_messages: bool) -> Self {
        self.persist_messages = persist_messages;
        self
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn loading(&self) -> LoadingState {
        self.state.borrow().loading
    }

    pub fn session_id(&self) -> Option<String> {
        self.state.borrow().session.as_ref().map(|s| s.id.clone())
    }

    /// Resolve the session and load its history. Runs once; later calls
    /// return immediately.
    pub async fn initialize(&self) {
        if self.initialized.replace(true) {
            return;
        }

        let session = self.sessions.resolve_or_create().await;
        let session_id = session.id.clone();
        self.state.borrow_mut().session = Some(session);
        self.event_bus.emit(ChatEvent::SessionStarted {
            session_id: session_id.clone(),
        });

        match self.store.get_history(&session_id).await {
            Ok(rows) => {
                let history: Vec<Message> = order_history(rows)
                    .into_iter()
                    .map(Message::from)
                    .collect();
                log::info!("Loaded {} stored messages", history.len());
                if history.is_empty() {
                    return;
                }
                {
                    let mut state = self.state.borrow_mut();
                    if state.session.as_ref().map(|s| s.id.as_str()) != Some(session_id.as_str()) {
                        log::info!("Session changed while loading history; dropping it");
                        return;
                    }
                    // Anything sent while history was loading stays after it
                    let sent = std::mem::take(&mut state.messages);
                    state.messages = history.clone();
                    state.messages.extend(sent);
                }
                self.event_bus.emit(ChatEvent::HistoryLoaded { messages: history });
            }
            Err(e) => {
                log::warn!(
                    "Could not load history from {} store: {}",
                    self.store.backend_name(),
                    e
                );
                self.event_bus.emit(ChatEvent::HistoryUnavailable {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Accept user input and append it to the conversation.
    ///
    /// Returns `None` without touching any state when the input is blank,
    /// a reply is already pending, or no session is resolved yet.
    pub fn begin_send(&self, input: &str) -> Option<PendingSend> {
        if input.trim().is_empty() {
            return None;
        }

        let (message, request) = {
            let mut state = self.state.borrow_mut();
            if state.loading == LoadingState::WaitingForReply {
                log::debug!("Send ignored: a reply is still pending");
                return None;
            }
            let session_id = match &state.session {
                Some(s) => s.id.clone(),
                None => {
                    log::warn!("Send ignored: no session yet");
                    return None;
                }
            };
            let message = Message::user(input);
            state.messages.push(message.clone());
            state.loading = LoadingState::WaitingForReply;
            let request = BackendRequest {
                message: input.to_string(),
                session_id,
            };
            (message, request)
        };

        let (handle, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(handle);

        self.event_bus.emit(ChatEvent::MessageAppended { message });
        self.event_bus.emit(ChatEvent::ReplyPending);

        Some(PendingSend { request, registration })
    }

    /// Call the backend for an accepted send and append the outcome.
    pub async fn complete_send(&self, pending: PendingSend) -> SendOutcome {
        let PendingSend { request, registration } = pending;

        let exchange = async {
            if self.persist_messages {
                self.persist(&request.session_id, Role::User, &request.message).await;
            }
            self.backend.send(&request).await
        };

        let result = match Abortable::new(exchange, registration).await {
            Ok(result) => result,
            Err(_aborted) => {
                log::info!("Discarded reply for cleared session {}", request.session_id);
                return SendOutcome::Cancelled;
            }
        };

        let (message, outcome) = match result {
            Ok(body) => {
                let reply = BotReply::from_body(&body);
                (Message::bot(reply.text, reply.chips), SendOutcome::Replied)
            }
            Err(e) => {
                log::error!("Chat backend request failed: {}", e);
                (
                    Message::bot(format!("Error: {}", e.detail()), Vec::new()),
                    SendOutcome::Failed,
                )
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.messages.push(message.clone());
            state.loading = LoadingState::Idle;
        }
        self.in_flight.borrow_mut().take();

        let reply_text = message.text.clone();
        self.event_bus.emit(ChatEvent::MessageAppended { message });
        self.event_bus.emit(ChatEvent::ReplySettled);

        if self.persist_messages && outcome == SendOutcome::Replied {
            self.persist(&request.session_id, Role::Bot, &reply_text).await;
        }

        outcome
    }

    /// `begin_send` followed by `complete_send`.
    pub async fn send(&self, input: &str) -> Option<SendOutcome> {
        let pending = self.begin_send(input)?;
        Some(self.complete_send(pending).await)
    }

    /// Drop the conversation and start a new session.
    /// The caller is responsible for confirming with the user first.
    pub async fn clear(&self) -> Session {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            handle.abort();
        }

        let previous = {
            let mut state = self.state.borrow_mut();
            state.messages.clear();
            state.loading = LoadingState::Idle;
            state.session.take()
        };

        let session = self.sessions.reset(previous.as_ref()).await;
        self.state.borrow_mut().session = Some(session.clone());
        self.event_bus.emit(ChatEvent::Cleared {
            session_id: session.id.clone(),
        });
        session
    }

    async fn persist(&self, session_id: &str, role: Role, content: &str) {
        if let Err(e) = self.store.save_message(session_id, role, content).await {
            log::warn!("Could not save {} message: {}", role.as_str(), e);
        }
    }
}

/// Stable sort by `created_at`, oldest first. Rows without a timestamp
/// keep their relative order at the front.
pub fn order_history(mut rows: Vec<ChatMessage>) -> Vec<ChatMessage> {
    rows.sort_by_key(|row| row.created_at);
    rows
}
