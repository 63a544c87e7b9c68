//! Port traits at the boundary between the session and the browser.
//!
//! These traits are defined here in `bellbot-core` (pure Rust).
//! Implementations live in `bellbot-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use serde::Serialize;
use bellbot_types::{
    Result,
    catalog::RoomType,
    message::Message,
    reservation::{PriceQuote, QuoteRequest, ReservationConfirmation, ReservationRequest},
};

// ─── Assistant Port ──────────────────────────────────────────

/// Body of one assistant request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Thread as it stood before `message` was appended
    pub history: Vec<Message>,
}

/// A successful assistant reply
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub room_refs: Vec<RoomType>,
    /// Server-assigned, kept verbatim
    pub timestamp: String,
}

#[async_trait(?Send)]
pub trait AssistantPort {
    /// One request/response exchange. Transport errors, non-success status
    /// and malformed bodies all surface as `Err`.
    async fn chat(&self, req: ChatRequest) -> Result<ChatReply>;

    /// Liveness probe for the backing service
    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

// ─── Reservation Port ────────────────────────────────────────

#[async_trait(?Send)]
pub trait ReservationPort {
    /// Book a room. Anything but an explicit success is `Err`.
    async fn reserve(&self, req: ReservationRequest) -> Result<ReservationConfirmation>;

    /// Price a stay without booking it
    async fn quote(&self, req: QuoteRequest) -> Result<PriceQuote>;
}

// ─── Speech Port ─────────────────────────────────────────────

/// Terminal signals of one listening session. Each arrives at most once per
/// session, but several may race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechSignal {
    Transcript(String),
    Error(String),
    End,
}

/// Control surface of a single-shot speech engine. Signals travel back
/// out-of-band (the platform adapter owns the channel).
pub trait SpeechPort {
    fn is_available(&self) -> bool;

    fn start(&self) -> Result<()>;

    fn stop(&self) -> Result<()>;
}
