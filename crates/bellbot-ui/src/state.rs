//! UI-level state that drives rendering.
//! This is a read-only projection of the session state,
//! updated each frame by draining the EventBus.

use chrono::NaiveDate;
use bellbot_types::{
    event::{FlowState, SessionEvent},
    message::Message,
    reservation::{FieldName, PriceQuote, ReservationDraft, ValidationError},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// State visible to UI panels
pub struct UiState {
    /// Thread as rendered, in append order
    pub messages: Vec<Message>,
    /// Input field content
    pub input_text: String,
    /// An assistant request is outstanding
    pub loading: bool,
    /// The microphone is capturing
    pub listening: bool,
    /// Hide the mic button when the browser has no recognizer
    pub speech_available: bool,
    pub flow_state: FlowState,
    /// Editable copy of the reservation draft
    pub form: ReservationForm,
    pub quote: Option<PriceQuote>,
    /// Errors from the last rejected submit
    pub validation_errors: Vec<ValidationError>,
    pub backend: BackendStatus,
    /// Status line text
    pub status_text: String,
}

/// Outcome of the startup health probe
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Unknown,
    Online,
    Offline(String),
}

/// Form buffers. Dates are typed as text and parsed on every edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationForm {
    pub draft: ReservationDraft,
    pub check_in_text: String,
    pub check_out_text: String,
}

impl ReservationForm {
    /// Overwrite the buffers with the controller's draft
    pub fn load(&mut self, draft: &ReservationDraft) {
        self.draft = draft.clone();
        self.check_in_text = format_date(draft.check_in);
        self.check_out_text = format_date(draft.check_out);
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `None` for blank or unparseable text
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

impl UiState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            loading: false,
            listening: false,
            speech_available: false,
            flow_state: FlowState::Closed,
            form: ReservationForm::default(),
            quote: None,
            validation_errors: Vec::new(),
            backend: BackendStatus::Unknown,
            status_text: "En línea".to_string(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                SessionEvent::RequestStarted { request_id } => {
                    log::debug!("UI: request #{} started", request_id);
                }
                SessionEvent::RequestFinished { request_id, success } => {
                    log::debug!("UI: request #{} finished (ok={})", request_id, success);
                }
                SessionEvent::LoadingChanged { loading } => {
                    self.loading = loading;
                    self.refresh_status();
                }
                SessionEvent::ListeningChanged { listening } => {
                    self.listening = listening;
                    self.refresh_status();
                }
                SessionEvent::TranscriptReady { .. } => {}
                SessionEvent::ReservationStateChanged { state } => {
                    self.flow_state = state;
                    if state == FlowState::Closed {
                        self.validation_errors.clear();
                    }
                    self.refresh_status();
                }
                SessionEvent::ValidationFailed { errors } => {
                    self.validation_errors = errors;
                }
                SessionEvent::QuoteUpdated { quote } => {
                    self.quote = quote;
                }
            }
        }
    }

    fn refresh_status(&mut self) {
        self.status_text = if self.flow_state == FlowState::Submitting {
            "Procesando reserva...".to_string()
        } else if self.loading {
            "Escribiendo...".to_string()
        } else if self.listening {
            "Escuchando...".to_string()
        } else {
            "En línea".to_string()
        };
    }

    /// A request to either remote service is outstanding
    pub fn is_busy(&self) -> bool {
        self.loading || self.flow_state == FlowState::Submitting
    }

    pub fn input_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn can_send(&self) -> bool {
        self.input_enabled() && !self.input_text.trim().is_empty()
    }

    /// Form fields accept edits only while the form is open and idle
    pub fn form_editable(&self) -> bool {
        self.flow_state == FlowState::Open
    }

    pub fn quick_actions_visible(&self) -> bool {
        self.flow_state == FlowState::Closed
    }

    pub fn field_error(&self, field: FieldName) -> Option<&ValidationError> {
        self.validation_errors.iter().find(|e| e.field() == field)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
