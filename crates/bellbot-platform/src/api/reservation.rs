use async_trait::async_trait;

use bellbot_core::ports::ReservationPort;
use bellbot_types::{
    config::ApiConfig,
    reservation::{PriceQuote, QuoteRequest, ReservationConfirmation, ReservationRequest},
    Result,
};

use super::wire;

/// Booking and pricing over `POST /api/reservar` and `POST /api/calcular-precio`
pub struct HttpReservations {
    config: ApiConfig,
}

impl HttpReservations {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl ReservationPort for HttpReservations {
    async fn reserve(&self, req: ReservationRequest) -> Result<ReservationConfirmation> {
        let body = super::post_json(&self.config.reservation_url(), &req).await?;
        wire::parse_reservation(&body)
    }

    async fn quote(&self, req: QuoteRequest) -> Result<PriceQuote> {
        let body = super::post_json(&self.config.quote_url(), &req).await?;
        wire::parse_quote(&body)
    }
}
