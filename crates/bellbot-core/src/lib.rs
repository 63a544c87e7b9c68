//! BellBot session core.
//!
//! Controllers for the chat thread, the voice-capture lifecycle and the
//! reservation form, plus the port traits the browser adapters implement.

pub mod event_bus;
pub mod history;
pub mod ports;
pub mod speech;
pub mod conversation;
pub mod reservation;
pub mod session;
