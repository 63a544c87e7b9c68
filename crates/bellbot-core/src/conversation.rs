//! Conversation controller: one user message in, one assistant message out.
//!
//! `send` does its synchronous part immediately (append the user message,
//! raise the loading flag) and hands back a future for the network part.
//! The caller spawns it (`spawn_local` in the browser). Several sends may be
//! in flight at once; their replies land in whatever order they resolve.

use std::cell::Cell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use bellbot_types::{BellbotError, event::SessionEvent, message::Message};

use crate::event_bus::EventBus;
use crate::history::MessageHistory;
use crate::ports::{AssistantPort, ChatRequest};

pub const SEND_FAILED_MESSAGE: &str =
    "Lo siento, hubo un error al procesar tu mensaje. Por favor, intenta nuevamente.";

/// Fixed prompts offered as one-tap buttons under the thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    ViewRooms,
    CheckPrices,
    MakeReservation,
    HotelServices,
}

impl QuickAction {
    pub fn all() -> &'static [QuickAction] {
        &[
            QuickAction::ViewRooms,
            QuickAction::CheckPrices,
            QuickAction::MakeReservation,
            QuickAction::HotelServices,
        ]
    }

    pub fn text(&self) -> &'static str {
        match self {
            QuickAction::ViewRooms => "Ver habitaciones disponibles",
            QuickAction::CheckPrices => "Consultar precios",
            QuickAction::MakeReservation => "Hacer una reserva",
            QuickAction::HotelServices => "Servicios del hotel",
        }
    }
}

/// How a send resolved. The thread already shows the result either way.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Replied,
    Failed(BellbotError),
}

#[derive(Clone)]
pub struct ConversationController {
    history: MessageHistory,
    assistant: Rc<dyn AssistantPort>,
    event_bus: EventBus,
    loading: Rc<Cell<bool>>,
    request_counter: Rc<Cell<u64>>,
}

impl ConversationController {
    pub fn new(
        history: MessageHistory,
        assistant: Rc<dyn AssistantPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            history,
            assistant,
            event_bus,
            loading: Rc::new(Cell::new(false)),
            request_counter: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Send `raw_text` to the assistant.
    ///
    /// Returns `None` (and changes nothing) when the text is blank. Otherwise
    /// the user message is already in the history when this returns; the
    /// caller should clear its input buffer and drive the returned future.
    pub fn send(&self, raw_text: &str) -> Option<LocalBoxFuture<'static, SendOutcome>> {
        if raw_text.trim().is_empty() {
            return None;
        }

        // Snapshot before appending: the new message travels in `message` only.
        let req = ChatRequest {
            message: raw_text.to_string(),
            history: self.history.all(),
        };
        self.history.append(Message::user(raw_text));

        let request_id = self.request_counter.get() + 1;
        self.request_counter.set(request_id);
        let guard = LoadingGuard::engage(self.loading.clone(), self.event_bus.clone());
        self.event_bus.emit(SessionEvent::RequestStarted { request_id });
        log::info!("Assistant request #{} ({} prior messages)", request_id, req.history.len());

        let this = self.clone();
        Some(Box::pin(async move {
            let _guard = guard;
            let outcome = match this.assistant.chat(req).await {
                Ok(reply) => {
                    this.history.append(Message::assistant_reply(
                        reply.text,
                        reply.room_refs,
                        reply.timestamp,
                    ));
                    SendOutcome::Replied
                }
                Err(e) => {
                    log::warn!("Assistant request #{} failed: {}", request_id, e);
                    this.history.append(Message::assistant(SEND_FAILED_MESSAGE));
                    SendOutcome::Failed(e)
                }
            };
            this.event_bus.emit(SessionEvent::RequestFinished {
                request_id,
                success: outcome == SendOutcome::Replied,
            });
            outcome
        }))
    }
}

/// Holds the loading flag up for as long as it lives. Dropping it (on
/// completion, or if the future is dropped unpolled) clears the flag once.
struct LoadingGuard {
    flag: Rc<Cell<bool>>,
    event_bus: EventBus,
}

impl LoadingGuard {
    fn engage(flag: Rc<Cell<bool>>, event_bus: EventBus) -> Self {
        flag.set(true);
        event_bus.emit(SessionEvent::LoadingChanged { loading: true });
        Self { flag, event_bus }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set(false);
        self.event_bus.emit(SessionEvent::LoadingChanged { loading: false });
    }
}
