//! WASM-target tests for bellbot-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use bellbot_types::catalog::*;
use bellbot_types::config::*;
use bellbot_types::error::*;
use bellbot_types::message::*;
use bellbot_types::reservation::*;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_user() {
    let msg = Message::user("Hola");
    assert_eq!(msg.role, Role::User);
    assert!(msg.is_user());
    assert!(msg.room_refs.is_empty());
}

#[wasm_bindgen_test]
fn message_reply_display_time() {
    let msg = Message::assistant_reply("x", vec![RoomType::Doble], "2025-06-01T09:30:00");
    assert_eq!(msg.display_time(), "09:30");
    assert_eq!(msg.room_refs, vec![RoomType::Doble]);
}

#[wasm_bindgen_test]
fn message_wire_shape() {
    let msg = Message::assistant_reply("x", vec![RoomType::TripleIndividual], "t");
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["imagenes"][0], "triple_individual");

    let user = serde_json::to_value(Message::user("y")).unwrap();
    assert!(user.get("imagenes").is_none());
}

// ─── Catalog Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn catalog_ids_parse_back() {
    for room in RoomType::all() {
        assert_eq!(room.id().parse::<RoomType>().unwrap(), *room);
    }
    assert!("suite".parse::<RoomType>().is_err());
}

#[wasm_bindgen_test]
fn catalog_capacity() {
    assert_eq!(RoomType::Matrimonial.info().capacity, 2);
    assert_eq!(RoomType::TripleMatrimonial.info().capacity, 3);
}

// ─── Reservation Tests ───────────────────────────────────

#[wasm_bindgen_test]
fn draft_default_is_empty() {
    let draft = ReservationDraft::default();
    assert!(draft.is_empty());
    assert_eq!(draft.guest_count, MIN_GUESTS);
}

#[wasm_bindgen_test]
fn draft_validate_collects_all() {
    let errors = ReservationDraft::default().validate(date("2025-05-20")).unwrap_err();
    assert!(errors.contains(&ValidationError::Missing(FieldName::GuestName)));
    assert!(errors.contains(&ValidationError::Missing(FieldName::CheckOut)));
}

#[wasm_bindgen_test]
fn draft_validate_ok() {
    let mut draft = ReservationDraft::default();
    draft.apply(DraftField::GuestName("Ana".to_string()));
    draft.apply(DraftField::Email("a@b.com".to_string()));
    draft.apply(DraftField::Phone("1234".to_string()));
    draft.apply(DraftField::RoomType(Some(RoomType::Doble)));
    draft.apply(DraftField::CheckIn(Some(date("2025-06-01"))));
    draft.apply(DraftField::CheckOut(Some(date("2025-06-03"))));
    draft.apply(DraftField::GuestCount(2));

    let req = draft.validate(date("2025-05-20")).unwrap();
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["tipo_habitacion"], "doble");
    assert_eq!(json["fecha_checkin"], "2025-06-01");
    assert_eq!(json["huespedes"], 2);

    assert!(draft.validate(date("2025-06-02")).is_err());
}

#[wasm_bindgen_test]
fn ars_formatting() {
    assert_eq!(format_ars(56000.0), "56.000");
    assert_eq!(format_ars(1234.5), "1.234,5");
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_endpoints() {
    let api = ApiConfig { base_url: "https://hotel.example/".to_string() };
    assert_eq!(api.chat_url(), "https://hotel.example/api/chat");
    assert_eq!(api.reservation_url(), "https://hotel.example/api/reservar");
    assert_eq!(ApiConfig::default().base_url, DEFAULT_API_BASE);
}

// ─── Error Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn error_display() {
    let err = BellbotError::Http { status: 503, body: "down".to_string() };
    assert!(err.to_string().contains("503"));
}
