//! Browser adapters for the BellBot session ports.
//!
//! `api` talks to the hotel backend over `fetch()`, `speech` wraps the Web
//! Speech API.

pub mod api;
pub mod speech;
