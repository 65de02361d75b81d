//! UI-level state that drives rendering.
//! This is a read-only projection of the chat controller state,
//! updated each frame by draining the EventBus.

use chat_types::event::ChatEvent;
use chat_types::message::Message;
use chat_core::controller::LoadingState;

/// State visible to UI panels
pub struct UiState {
    /// Displayed conversation
    pub messages: Vec<Message>,
    /// Whether a reply is pending
    pub loading: LoadingState,
    /// Current session id, once resolved
    pub session_id: Option<String>,
    /// Input field content
    pub input_text: String,
    /// Whether the clear-chat confirmation is open
    pub confirm_clear: bool,
    /// Status line text
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            loading: LoadingState::Idle,
            session_id: None,
            input_text: String::new(),
            confirm_clear: false,
            status_text: "Connecting...".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionStarted { session_id } => {
                    self.session_id = Some(session_id);
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::HistoryLoaded { messages } => {
                    let sent = std::mem::take(&mut self.messages);
                    self.messages = messages;
                    self.messages.extend(sent);
                }
                ChatEvent::HistoryUnavailable { reason } => {
                    self.status_text = format!("History unavailable: {}", reason);
                }
                ChatEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                ChatEvent::ReplyPending => {
                    self.loading = LoadingState::WaitingForReply;
                    self.status_text = "Waiting for reply...".to_string();
                }
                ChatEvent::ReplySettled => {
                    self.loading = LoadingState::Idle;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::Cleared { session_id } => {
                    self.messages.clear();
                    self.input_text.clear();
                    self.loading = LoadingState::Idle;
                    self.session_id = Some(session_id);
                    self.status_text = "Ready".to_string();
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading == LoadingState::WaitingForReply
    }

    pub fn can_send(&self) -> bool {
        !self.input_text.trim().is_empty() && !self.is_busy() && self.session_id.is_some()
    }

    /// Take the input for sending, leaving the field empty.
    /// The raw text is returned untrimmed.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }

    /// Open the clear-chat confirmation.
    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    /// Close the confirmation. Returns true when the user confirmed, in
    /// which case pending input is dropped as well.
    pub fn resolve_clear(&mut self, confirmed: bool) -> bool {
        let was_open = std::mem::replace(&mut self.confirm_clear, false);
        if was_open && confirmed {
            self.input_text.clear();
            return true;
        }
        false
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
