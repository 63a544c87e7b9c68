pub mod message;
pub mod catalog;
pub mod reservation;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::BellbotError;
pub type Result<T> = std::result::Result<T, BellbotError>;
