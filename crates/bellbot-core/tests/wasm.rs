//! WASM-target tests for bellbot-core.
//!
//! Drives the session controllers against in-memory ports under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use bellbot_core::conversation::{QuickAction, SEND_FAILED_MESSAGE};
use bellbot_core::event_bus::EventBus;
use bellbot_core::ports::*;
use bellbot_core::reservation::RESERVATION_FAILED_MESSAGE;
use bellbot_core::session::{Session, SessionPorts, GREETING};
use bellbot_core::speech::CaptureState;
use bellbot_types::catalog::RoomType;
use bellbot_types::event::{FlowState, SessionEvent};
use bellbot_types::message::Role;
use bellbot_types::reservation::*;
use bellbot_types::BellbotError;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::executor::block_on;
use std::rc::Rc;

struct EchoAssistant;

#[async_trait(?Send)]
impl AssistantPort for EchoAssistant {
    async fn chat(&self, req: ChatRequest) -> bellbot_types::Result<ChatReply> {
        if req.message == "falla" {
            return Err(BellbotError::Http { status: 500, body: String::new() });
        }
        Ok(ChatReply {
            text: format!("eco: {}", req.message),
            room_refs: vec![RoomType::TripleMatrimonial],
            timestamp: "2025-06-01T10:00:00".to_string(),
        })
    }
}

struct FixedReservations {
    accept: bool,
}

#[async_trait(?Send)]
impl ReservationPort for FixedReservations {
    async fn reserve(
        &self,
        _req: ReservationRequest,
    ) -> bellbot_types::Result<ReservationConfirmation> {
        if self.accept {
            Ok(ReservationConfirmation { reservation_id: 9, nights: 2, total_price: 56000.0 })
        } else {
            Err(BellbotError::Rejected("success=false".to_string()))
        }
    }

    async fn quote(&self, _req: QuoteRequest) -> bellbot_types::Result<PriceQuote> {
        Ok(PriceQuote { nights: 2, total_price: 56000.0, average_per_night: 28000.0 })
    }
}

struct AlwaysOnSpeech;

impl SpeechPort for AlwaysOnSpeech {
    fn is_available(&self) -> bool {
        true
    }
    fn start(&self) -> bellbot_types::Result<()> {
        Ok(())
    }
    fn stop(&self) -> bellbot_types::Result<()> {
        Ok(())
    }
}

fn session(accept: bool) -> Session {
    Session::new(
        SessionPorts {
            assistant: Rc::new(EchoAssistant),
            reservations: Rc::new(FixedReservations { accept }),
            speech: Some(Rc::new(AlwaysOnSpeech)),
        },
        EventBus::new(),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
}

fn fill(session: &Session) {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    session.update_field(DraftField::GuestName("Ana".to_string()));
    session.update_field(DraftField::Email("a@b.com".to_string()));
    session.update_field(DraftField::Phone("1234".to_string()));
    session.update_field(DraftField::RoomType(Some(RoomType::Doble)));
    session.update_field(DraftField::CheckIn(d("2025-06-01")));
    session.update_field(DraftField::CheckOut(d("2025-06-03")));
    session.update_field(DraftField::GuestCount(2));
}

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn greeting_first() {
    let s = session(true);
    assert_eq!(s.history().all()[0].content, GREETING);
}

#[wasm_bindgen_test]
fn send_and_reply() {
    let s = session(true);
    let mut input = "hola".to_string();
    block_on(s.send_input(&mut input).unwrap());
    assert!(input.is_empty());
    let last = s.history().last().unwrap();
    assert_eq!(last.content, "eco: hola");
    assert_eq!(last.room_refs, vec![RoomType::TripleMatrimonial]);
}

#[wasm_bindgen_test]
fn send_failure_apologizes() {
    let s = session(true);
    block_on(s.conversation().send("falla").unwrap());
    assert_eq!(s.history().last().unwrap().content, SEND_FAILED_MESSAGE);
    assert!(!s.is_loading());
}

#[wasm_bindgen_test]
fn quick_action_roundtrip() {
    let s = session(true);
    block_on(s.quick_action(QuickAction::ViewRooms).unwrap());
    let all = s.history().all();
    assert_eq!(all[1].role, Role::User);
    assert_eq!(all[1].content, "Ver habitaciones disponibles");
}

// ─── Speech Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn speech_transcript_fills_input() {
    let s = session(true);
    let mut input = "viejo".to_string();
    assert_eq!(s.toggle_mic(), CaptureState::Listening);
    s.handle_speech_signal(SpeechSignal::Transcript("nuevo".to_string()), &mut input);
    assert_eq!(input, "nuevo");
    assert_eq!(s.speech().state(), CaptureState::Idle);
}

// ─── Reservation Tests ───────────────────────────────────

#[wasm_bindgen_test]
fn reservation_confirmed() {
    let s = session(true);
    s.toggle_reservation();
    fill(&s);
    block_on(s.submit_reservation(today()).ok().unwrap());
    assert_eq!(s.reservation().state(), FlowState::Closed);
    assert!(s.history().last().unwrap().content.contains("Noches: 2"));
}

#[wasm_bindgen_test]
fn reservation_refused_keeps_form() {
    let s = session(false);
    s.toggle_reservation();
    fill(&s);
    block_on(s.submit_reservation(today()).ok().unwrap());
    assert_eq!(s.reservation().state(), FlowState::Open);
    assert_eq!(s.reservation().draft().guest_name, "Ana");
    assert_eq!(s.history().last().unwrap().content, RESERVATION_FAILED_MESSAGE);
}

#[wasm_bindgen_test]
fn reservation_invalid_emits_errors() {
    let s = session(true);
    s.toggle_reservation();
    let _ = s.event_bus().drain();
    assert!(s.submit_reservation(today()).is_err());
    let events = s.event_bus().drain();
    assert!(events.iter().any(|e| matches!(e, SessionEvent::ValidationFailed { .. })));
}

#[wasm_bindgen_test]
fn quote_for_filled_draft() {
    let s = session(true);
    s.toggle_reservation();
    fill(&s);
    let quote = block_on(s.request_quote().unwrap()).unwrap();
    assert_eq!(quote.total_price, 56000.0);
}
