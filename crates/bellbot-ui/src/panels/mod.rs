pub mod chat;
pub mod quick_actions;
pub mod reservation;
