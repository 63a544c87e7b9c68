//! Reservation draft, its validation, and the reservation service payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::RoomType;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 3;

/// Working state of the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_type: Option<RoomType>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: u8,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            guest_name: String::new(),
            email: String::new(),
            phone: String::new(),
            room_type: None,
            check_in: None,
            check_out: None,
            guest_count: MIN_GUESTS,
        }
    }
}

/// One typed edit of a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    GuestName(String),
    Email(String),
    Phone(String),
    RoomType(Option<RoomType>),
    CheckIn(Option<NaiveDate>),
    CheckOut(Option<NaiveDate>),
    GuestCount(u8),
}

impl DraftField {
    /// Whether this edit changes what a price quote depends on.
    pub fn affects_price(&self) -> bool {
        matches!(
            self,
            DraftField::RoomType(_) | DraftField::CheckIn(_) | DraftField::CheckOut(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    GuestName,
    Email,
    Phone,
    RoomType,
    CheckIn,
    CheckOut,
    GuestCount,
}

impl FieldName {
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::GuestName => "Nombre Completo",
            FieldName::Email => "Email",
            FieldName::Phone => "Teléfono",
            FieldName::RoomType => "Tipo de Habitación",
            FieldName::CheckIn => "Check-in",
            FieldName::CheckOut => "Check-out",
            FieldName::GuestCount => "Número de Huéspedes",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} es obligatorio")]
    Missing(FieldName),

    #[error("El número de huéspedes debe estar entre 1 y 3 (recibido {0})")]
    GuestCountOutOfRange(u8),

    #[error("La fecha de check-in ({check_in}) ya pasó; elegí una desde {today}")]
    CheckInInPast { check_in: NaiveDate, today: NaiveDate },

    #[error("La fecha de check-out ({check_out}) es anterior al check-in ({check_in})")]
    CheckOutBeforeCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

impl ValidationError {
    pub fn field(&self) -> FieldName {
        match self {
            ValidationError::Missing(f) => *f,
            ValidationError::GuestCountOutOfRange(_) => FieldName::GuestCount,
            ValidationError::CheckInInPast { .. } => FieldName::CheckIn,
            ValidationError::CheckOutBeforeCheckIn { .. } => FieldName::CheckOut,
        }
    }
}

impl ReservationDraft {
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::GuestName(v) => self.guest_name = v,
            DraftField::Email(v) => self.email = v,
            DraftField::Phone(v) => self.phone = v,
            DraftField::RoomType(v) => self.room_type = v,
            DraftField::CheckIn(v) => self.check_in = v,
            DraftField::CheckOut(v) => self.check_out = v,
            DraftField::GuestCount(v) => self.guest_count = v,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Earliest selectable check-in date.
    pub fn min_check_in(&self, today: NaiveDate) -> NaiveDate {
        today
    }

    /// Earliest selectable check-out date: the check-in if chosen, else today.
    pub fn min_check_out(&self, today: NaiveDate) -> NaiveDate {
        self.check_in.unwrap_or(today)
    }

    /// Check every field against `today` and build the wire request.
    ///
    /// Collects all failures rather than stopping at the first one, so the
    /// form can mark each offending field. Equal check-in and check-out
    /// dates pass, and so does a check-in of today.
    pub fn validate(&self, today: NaiveDate) -> Result<ReservationRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let text_fields = [
            (FieldName::GuestName, &self.guest_name),
            (FieldName::Email, &self.email),
            (FieldName::Phone, &self.phone),
        ];
        for (name, value) in text_fields {
            if value.trim().is_empty() {
                errors.push(ValidationError::Missing(name));
            }
        }
        if self.room_type.is_none() {
            errors.push(ValidationError::Missing(FieldName::RoomType));
        }
        if self.check_in.is_none() {
            errors.push(ValidationError::Missing(FieldName::CheckIn));
        }
        if self.check_out.is_none() {
            errors.push(ValidationError::Missing(FieldName::CheckOut));
        }
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&self.guest_count) {
            errors.push(ValidationError::GuestCountOutOfRange(self.guest_count));
        }
        if let Some(check_in) = self.check_in {
            let min = self.min_check_in(today);
            if check_in < min {
                errors.push(ValidationError::CheckInInPast { check_in, today: min });
            }
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out < check_in {
                errors.push(ValidationError::CheckOutBeforeCheckIn { check_in, check_out });
            }
        }

        match (self.room_type, self.check_in, self.check_out) {
            (Some(room_type), Some(check_in), Some(check_out)) if errors.is_empty() => {
                Ok(ReservationRequest {
                    guest_name: self.guest_name.clone(),
                    email: self.email.clone(),
                    phone: self.phone.clone(),
                    room_type,
                    check_in,
                    check_out,
                    guest_count: self.guest_count,
                })
            }
            _ => Err(errors),
        }
    }

    /// A quote request, once room and both dates are set and ordered.
    pub fn quote_request(&self) -> Option<QuoteRequest> {
        let room_type = self.room_type?;
        let check_in = self.check_in?;
        let check_out = self.check_out?;
        if check_out < check_in {
            return None;
        }
        Some(QuoteRequest { room_type, check_in, check_out })
    }
}

/// Body of `POST /api/reservar`. Field names are fixed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(rename = "nombre")]
    pub guest_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "tipo_habitacion")]
    pub room_type: RoomType,
    #[serde(rename = "fecha_checkin")]
    pub check_in: NaiveDate,
    #[serde(rename = "fecha_checkout")]
    pub check_out: NaiveDate,
    #[serde(rename = "huespedes")]
    pub guest_count: u8,
}

/// A successful booking as reported by the reservation service
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationConfirmation {
    pub reservation_id: u64,
    pub nights: u32,
    pub total_price: f64,
}

/// Body of `POST /api/calcular-precio`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "tipo_habitacion")]
    pub room_type: RoomType,
    #[serde(rename = "fecha_checkin")]
    pub check_in: NaiveDate,
    #[serde(rename = "fecha_checkout")]
    pub check_out: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(rename = "noches")]
    pub nights: u32,
    #[serde(rename = "precio_total")]
    pub total_price: f64,
    #[serde(rename = "precio_promedio_noche")]
    pub average_per_night: f64,
}

/// Format an amount the way `es-AR` renders numbers: `.` groups thousands,
/// `,` separates decimals, at most three decimals with trailing zeros dropped.
pub fn format_ars(amount: f64) -> String {
    let millis = (amount.abs() * 1000.0).round() as u64;
    let whole = (millis / 1000).to_string();
    let frac = millis % 1000;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if amount < 0.0 && millis > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac != 0 {
        let digits = format!("{:03}", frac);
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}
