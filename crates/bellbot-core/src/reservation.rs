//! Reservation flow controller.
//!
//! State machine over the booking form:
//! - Closed -> Open (user opens the form)
//! - Open -> Closed (user closes it; the draft is kept)
//! - Open -> Submitting (submit, draft under validation / in flight)
//! - Submitting -> Open (validation failed, or the service refused)
//! - Submitting -> Closed (booking confirmed; the draft is reset)

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use futures::future::LocalBoxFuture;
use bellbot_types::{
    BellbotError,
    event::{FlowState, SessionEvent},
    message::Message,
    reservation::{
        format_ars, DraftField, PriceQuote, ReservationConfirmation, ReservationDraft,
        ValidationError,
    },
};

use crate::event_bus::EventBus;
use crate::history::MessageHistory;
use crate::ports::ReservationPort;

pub const RESERVATION_FAILED_MESSAGE: &str =
    "Hubo un error al procesar tu reserva. Por favor, intenta nuevamente o contacta a recepción.";

/// Chat text announcing a confirmed booking.
pub fn confirmation_message(confirmation: &ReservationConfirmation, email: &str) -> String {
    format!(
        "¡Reserva confirmada exitosamente! 🎉\n\n\
         ID de Reserva: {}\n\
         Noches: {}\n\
         Precio Total: ${}\n\n\
         Recibirás un email de confirmación en {}. ¡Esperamos tu visita!",
        confirmation.reservation_id,
        confirmation.nights,
        format_ars(confirmation.total_price),
        email,
    )
}

/// Why `submit` did not start a request
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRejected {
    /// Only an open form can be submitted
    NotOpen(FlowState),
    /// Draft failed validation; the form is open again
    Invalid(Vec<ValidationError>),
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::NotOpen(state) => write!(f, "form is {:?}, not open", state),
            SubmitRejected::Invalid(errors) => write!(f, "{} invalid field(s)", errors.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Confirmed(ReservationConfirmation),
    Failed(BellbotError),
}

struct FlowInner {
    state: FlowState,
    draft: ReservationDraft,
    quote: Option<PriceQuote>,
    /// Bumped on every price-relevant edit; stale quotes are dropped
    revision: u64,
}

#[derive(Clone)]
pub struct ReservationFlow {
    inner: Rc<RefCell<FlowInner>>,
    history: MessageHistory,
    service: Rc<dyn ReservationPort>,
    event_bus: EventBus,
}

impl ReservationFlow {
    pub fn new(
        history: MessageHistory,
        service: Rc<dyn ReservationPort>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FlowInner {
                state: FlowState::Closed,
                draft: ReservationDraft::default(),
                quote: None,
                revision: 0,
            })),
            history,
            service,
            event_bus,
        }
    }

    pub fn state(&self) -> FlowState {
        self.inner.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state() != FlowState::Closed
    }

    pub fn draft(&self) -> ReservationDraft {
        self.inner.borrow().draft.clone()
    }

    pub fn quote(&self) -> Option<PriceQuote> {
        self.inner.borrow().quote.clone()
    }

    pub fn open(&self) {
        if self.state() == FlowState::Closed {
            self.set_state(FlowState::Open);
        }
    }

    /// Hide the form. The draft survives; ignored while a submission is out.
    pub fn close(&self) {
        match self.state() {
            FlowState::Open => self.set_state(FlowState::Closed),
            FlowState::Submitting => log::debug!("Ignoring close while a reservation is in flight"),
            FlowState::Closed => {}
        }
    }

    pub fn toggle(&self) -> FlowState {
        if self.state() == FlowState::Closed {
            self.open();
        } else {
            self.close();
        }
        self.state()
    }

    /// Apply one edit. No cross-field checks happen here.
    pub fn update_field(&self, field: DraftField) {
        let cleared_quote = {
            let mut inner = self.inner.borrow_mut();
            let affects_price = field.affects_price();
            inner.draft.apply(field);
            if affects_price {
                inner.revision += 1;
                inner.quote.take().is_some()
            } else {
                false
            }
        };
        if cleared_quote {
            self.event_bus.emit(SessionEvent::QuoteUpdated { quote: None });
        }
    }

    /// Validate the draft against `today` and, if it passes, book it.
    ///
    /// Rejections are synchronous and never touch the network or the chat.
    /// The returned future resolves after the confirmation or apology has
    /// been appended to the history.
    pub fn submit(
        &self,
        today: NaiveDate,
    ) -> Result<LocalBoxFuture<'static, SubmitOutcome>, SubmitRejected> {
        let state = self.state();
        if state != FlowState::Open {
            log::debug!("Reservation submit ignored in state {:?}", state);
            return Err(SubmitRejected::NotOpen(state));
        }
        self.set_state(FlowState::Submitting);

        let validated = self.inner.borrow().draft.validate(today);
        let req = match validated {
            Ok(req) => req,
            Err(errors) => {
                self.set_state(FlowState::Open);
                self.event_bus.emit(SessionEvent::ValidationFailed { errors: errors.clone() });
                return Err(SubmitRejected::Invalid(errors));
            }
        };

        log::info!("Submitting reservation for {} ({})", req.room_type, req.check_in);
        let this = self.clone();
        Ok(Box::pin(async move {
            let email = req.email.clone();
            match this.service.reserve(req).await {
                Ok(confirmation) => {
                    log::info!("Reservation {} confirmed", confirmation.reservation_id);
                    this.history
                        .append(Message::assistant(confirmation_message(&confirmation, &email)));
                    let had_quote = {
                        let mut inner = this.inner.borrow_mut();
                        inner.draft = ReservationDraft::default();
                        inner.revision += 1;
                        inner.quote.take().is_some()
                    };
                    if had_quote {
                        this.event_bus.emit(SessionEvent::QuoteUpdated { quote: None });
                    }
                    this.set_state(FlowState::Closed);
                    SubmitOutcome::Confirmed(confirmation)
                }
                Err(e) => {
                    log::warn!("Reservation failed: {}", e);
                    this.history.append(Message::assistant(RESERVATION_FAILED_MESSAGE));
                    this.set_state(FlowState::Open);
                    SubmitOutcome::Failed(e)
                }
            }
        }))
    }

    /// Ask the service to price the current draft. `None` until room type and
    /// both dates are set. A reply that arrives after further edits is dropped.
    pub fn request_quote(&self) -> Option<LocalBoxFuture<'static, Option<PriceQuote>>> {
        let (req, revision) = {
            let inner = self.inner.borrow();
            (inner.draft.quote_request()?, inner.revision)
        };

        let this = self.clone();
        Some(Box::pin(async move {
            let result = this.service.quote(req).await;
            if this.inner.borrow().revision != revision {
                log::debug!("Discarding quote for a superseded draft");
                return None;
            }
            let quote = match result {
                Ok(q) => Some(q),
                Err(e) => {
                    log::warn!("Price quote failed: {}", e);
                    None
                }
            };
            this.inner.borrow_mut().quote = quote.clone();
            this.event_bus.emit(SessionEvent::QuoteUpdated { quote: quote.clone() });
            quote
        }))
    }

    fn set_state(&self, state: FlowState) {
        let prev = std::mem::replace(&mut self.inner.borrow_mut().state, state);
        if prev != state {
            log::debug!("Reservation flow: {:?} -> {:?}", prev, state);
            self.event_bus.emit(SessionEvent::ReservationStateChanged { state });
        }
    }
}
