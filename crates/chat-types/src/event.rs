use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Events emitted by the chat controller.
/// The UI drains these each frame to update its projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A session id is in effect (resolved on mount or created on reset)
    SessionStarted { session_id: String },

    /// Stored history replaced the message list
    HistoryLoaded { messages: Vec<Message> },

    /// The store could not be read; the conversation starts empty
    HistoryUnavailable { reason: String },

    /// A message was appended to the conversation
    MessageAppended { message: Message },

    /// A request to the chat backend started
    ReplyPending,

    /// The pending request settled (reply, error, or cancellation)
    ReplySettled,

    /// The conversation was cleared and a new session started
    Cleared { session_id: String },
}
