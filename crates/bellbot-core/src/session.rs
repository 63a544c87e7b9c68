//! Session orchestrator. Composes the controllers and routes user actions.
//!
//! Holds no business state of its own. Whether the reservation form or the
//! quick-action bar is shown is read straight off the reservation flow,
//! which only this type opens and closes.

use std::rc::Rc;

use chrono::NaiveDate;
use futures::future::LocalBoxFuture;
use bellbot_types::{
    event::FlowState,
    message::Message,
    reservation::{DraftField, PriceQuote},
};

use crate::conversation::{ConversationController, QuickAction, SendOutcome};
use crate::event_bus::EventBus;
use crate::history::MessageHistory;
use crate::ports::{AssistantPort, ReservationPort, SpeechPort, SpeechSignal};
use crate::reservation::{ReservationFlow, SubmitOutcome, SubmitRejected};
use crate::speech::{CaptureState, SpeechCapture};

pub const GREETING: &str = "¡Bienvenido al Gran Hotel Bell Ville! 🏨 Soy BellBot, tu asistente virtual. \
¿En qué puedo ayudarte hoy? Puedo ayudarte a reservar una habitación, mostrarte nuestras opciones \
o responder cualquier pregunta sobre el hotel.";

/// External collaborators handed to a new session
pub struct SessionPorts {
    pub assistant: Rc<dyn AssistantPort>,
    pub reservations: Rc<dyn ReservationPort>,
    /// `None` when the platform has no speech recognizer
    pub speech: Option<Rc<dyn SpeechPort>>,
}

pub struct Session {
    event_bus: EventBus,
    history: MessageHistory,
    conversation: ConversationController,
    reservation: ReservationFlow,
    speech: SpeechCapture,
}

impl Session {
    /// Build a session whose thread starts with the greeting.
    pub fn new(ports: SessionPorts, event_bus: EventBus) -> Self {
        let history = MessageHistory::new(event_bus.clone());
        let conversation =
            ConversationController::new(history.clone(), ports.assistant, event_bus.clone());
        let reservation =
            ReservationFlow::new(history.clone(), ports.reservations, event_bus.clone());
        let speech = SpeechCapture::new(ports.speech, event_bus.clone());

        history.append(Message::assistant(GREETING));

        Self {
            event_bus,
            history,
            conversation,
            reservation,
            speech,
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn conversation(&self) -> &ConversationController {
        &self.conversation
    }

    pub fn reservation(&self) -> &ReservationFlow {
        &self.reservation
    }

    pub fn speech(&self) -> &SpeechCapture {
        &self.speech
    }

    /// True while either remote service has a request out
    pub fn is_loading(&self) -> bool {
        self.conversation.is_loading() || self.reservation.state() == FlowState::Submitting
    }

    pub fn reservation_visible(&self) -> bool {
        self.reservation.is_visible()
    }

    pub fn quick_actions_visible(&self) -> bool {
        !self.reservation_visible()
    }

    /// Send the input buffer. The buffer is cleared only if the send was
    /// accepted, before the reply is known.
    pub fn send_input(&self, input: &mut String) -> Option<LocalBoxFuture<'static, SendOutcome>> {
        let pending = self.conversation.send(input.as_str())?;
        input.clear();
        Some(pending)
    }

    pub fn quick_action(&self, action: QuickAction) -> Option<LocalBoxFuture<'static, SendOutcome>> {
        self.conversation.send(action.text())
    }

    pub fn toggle_mic(&self) -> CaptureState {
        self.speech.toggle()
    }

    /// Route a speech engine signal. A transcript replaces the input buffer;
    /// it is not sent.
    pub fn handle_speech_signal(&self, signal: SpeechSignal, input: &mut String) {
        if let Some(text) = self.speech.on_signal(signal) {
            *input = text;
        }
    }

    pub fn toggle_reservation(&self) -> FlowState {
        self.reservation.toggle()
    }

    /// Hide the form, keeping the draft. Ignored while submitting.
    pub fn close_reservation(&self) -> FlowState {
        self.reservation.close();
        self.reservation.state()
    }

    pub fn update_field(&self, field: DraftField) {
        self.reservation.update_field(field);
    }

    pub fn submit_reservation(
        &self,
        today: NaiveDate,
    ) -> Result<LocalBoxFuture<'static, SubmitOutcome>, SubmitRejected> {
        self.reservation.submit(today)
    }

    pub fn request_quote(&self) -> Option<LocalBoxFuture<'static, Option<PriceQuote>>> {
        self.reservation.request_quote()
    }
}
