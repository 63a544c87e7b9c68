//! HTTP adapters for the hotel backend.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

mod assistant;
mod reservation;
pub mod wire;

pub use assistant::HttpAssistant;
pub use reservation::HttpReservations;

use gloo_net::http::{Request, Response};
use serde::Serialize;

use bellbot_types::{BellbotError, Result};

/// POST `body` as JSON and return the response text of a 2xx reply.
pub(crate) async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<String> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| BellbotError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| BellbotError::Network(e.to_string()))?;

    read_body(response).await
}

pub(crate) async fn get(url: &str) -> Result<String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| BellbotError::Network(e.to_string()))?;

    read_body(response).await
}

async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| BellbotError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(wire::http_error(status, &text));
    }
    Ok(text)
}
