pub mod chat;
pub mod confirm;
