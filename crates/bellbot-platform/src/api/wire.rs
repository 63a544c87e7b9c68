//! JSON bodies exchanged with the hotel backend.
//!
//! Parsing works on response text so it can be exercised without a browser.

use serde::Deserialize;

use bellbot_core::ports::ChatReply;
use bellbot_types::{
    BellbotError, Result,
    catalog::RoomType,
    reservation::{PriceQuote, ReservationConfirmation},
};

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
    #[serde(default)]
    imagenes: Vec<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Deserialize)]
struct ReservationResponse {
    #[serde(default)]
    success: bool,
    reserva_id: Option<u64>,
    noches: Option<u32>,
    precio_total: Option<f64>,
    #[serde(default)]
    mensaje: Option<String>,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ─── Parsers ─────────────────────────────────────────────────

/// Decode an assistant reply. Room ids the catalog does not know are
/// dropped; a missing timestamp is replaced with the local clock.
pub fn parse_chat_reply(body: &str) -> Result<ChatReply> {
    let data: ChatResponse = serde_json::from_str(body)?;

    let room_refs = data
        .imagenes
        .iter()
        .filter_map(|id| match id.parse::<RoomType>() {
            Ok(room) => Some(room),
            Err(_) => {
                log::warn!("Ignoring unknown room id in reply: {}", id);
                None
            }
        })
        .collect();

    Ok(ChatReply {
        text: data.response,
        room_refs,
        timestamp: data
            .timestamp
            .unwrap_or_else(bellbot_types::message::now_timestamp),
    })
}

/// Decode a booking response. Only an explicit `success: true` carrying the
/// id, night count and total counts as a confirmation.
pub fn parse_reservation(body: &str) -> Result<ReservationConfirmation> {
    let data: ReservationResponse = serde_json::from_str(body)?;
    if !data.success {
        return Err(BellbotError::Rejected(
            data.mensaje.unwrap_or_else(|| "success flag not set".to_string()),
        ));
    }

    match (data.reserva_id, data.noches, data.precio_total) {
        (Some(reservation_id), Some(nights), Some(total_price)) => Ok(ReservationConfirmation {
            reservation_id,
            nights,
            total_price,
        }),
        _ => Err(BellbotError::Decode(
            "reservation response missing reserva_id, noches or precio_total".to_string(),
        )),
    }
}

pub fn parse_quote(body: &str) -> Result<PriceQuote> {
    Ok(serde_json::from_str(body)?)
}

/// Decode the health probe; any status other than `ok` is unavailable.
pub fn parse_health(body: &str) -> Result<String> {
    let data: HealthResponse = serde_json::from_str(body)?;
    if data.status == "ok" {
        Ok(data.message)
    } else {
        Err(BellbotError::Unavailable(format!("status {}", data.status)))
    }
}

/// Build the error for a non-2xx response, preferring the service's own
/// `{"error": ...}` text when the body has one.
pub fn http_error(status: u16, body: &str) -> BellbotError {
    let body = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());
    BellbotError::Http { status, body }
}
