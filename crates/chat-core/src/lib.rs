pub mod ports;
pub mod event_bus;
pub mod session;
pub mod reply;
pub mod format;
pub mod controller;
