use crate::message::Message;
use crate::reservation::{PriceQuote, ValidationError};

/// Events emitted by the session controllers.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A message was appended to the history
    MessageAppended { message: Message },
    /// An assistant request was issued
    RequestStarted { request_id: u64 },
    /// An assistant request resolved (either way)
    RequestFinished { request_id: u64, success: bool },
    /// The conversation loading flag flipped
    LoadingChanged { loading: bool },
    /// Speech capture started or stopped listening
    ListeningChanged { listening: bool },
    /// The speech engine recognised an utterance
    TranscriptReady { text: String },
    /// The reservation flow moved to another state
    ReservationStateChanged { state: FlowState },
    /// The draft failed validation; nothing was sent
    ValidationFailed { errors: Vec<ValidationError> },
    /// A price quote for the current draft arrived (None = cleared)
    QuoteUpdated { quote: Option<PriceQuote> },
}

/// Reservation flow state, as seen from outside the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Closed,
    Open,
    Submitting,
}
