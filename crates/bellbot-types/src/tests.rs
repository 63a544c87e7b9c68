#[cfg(test)]
mod tests {
    use crate::catalog::*;
    use crate::config::*;
    use crate::error::*;
    use crate::message::*;
    use crate::reservation::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        date("2025-05-20")
    }

    fn complete_draft() -> ReservationDraft {
        ReservationDraft {
            guest_name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            phone: "1234".to_string(),
            room_type: Some(RoomType::Doble),
            check_in: Some(date("2025-06-01")),
            check_out: Some(date("2025-06-03")),
            guest_count: 2,
        }
    }

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hola");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hola");
        assert!(msg.room_refs.is_empty());
        assert!(msg.is_user());
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
    }

    #[test]
    fn test_message_assistant_reply_keeps_server_timestamp() {
        let msg = Message::assistant_reply(
            "Mirá estas opciones",
            vec![RoomType::Doble],
            "2025-06-01T14:05:09.123456",
        );
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.timestamp, "2025-06-01T14:05:09.123456");
        assert_eq!(msg.display_time(), "14:05");
    }

    #[test]
    fn test_message_display_time_falls_back_to_raw() {
        let msg = Message::assistant_reply("x", vec![], "ayer");
        assert_eq!(msg.display_time(), "ayer");
    }

    #[test]
    fn test_message_serializes_room_refs_as_imagenes() {
        let msg = Message::assistant_reply("x", vec![RoomType::TripleMatrimonial], "t");
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["imagenes"][0], "triple_matrimonial");
    }

    #[test]
    fn test_message_omits_empty_imagenes() {
        let json = serde_json::to_string(&Message::user("hola")).unwrap();
        assert!(!json.contains("imagenes"));
        assert!(json.contains(r#""role":"user""#));
    }

    #[test]
    fn test_message_content_keeps_newlines() {
        let msg = Message::assistant("línea 1\n\nlínea 2");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, "línea 1\n\nlínea 2");
    }

    // ─── Catalog Tests ───────────────────────────────────────

    #[test]
    fn test_catalog_has_four_rooms() {
        assert_eq!(RoomType::all().len(), 4);
    }

    #[test]
    fn test_catalog_ids_roundtrip_through_from_str() {
        for room in RoomType::all() {
            let parsed: RoomType = room.id().parse().unwrap();
            assert_eq!(parsed, *room);
        }
    }

    #[test]
    fn test_catalog_unknown_id() {
        let err = "suite".parse::<RoomType>().unwrap_err();
        assert!(matches!(err, BellbotError::Decode(_)));
    }

    #[test]
    fn test_catalog_capacities() {
        assert_eq!(RoomType::Matrimonial.info().capacity, 2);
        assert_eq!(RoomType::Doble.info().capacity, 2);
        assert_eq!(RoomType::TripleMatrimonial.info().capacity, 3);
        assert_eq!(RoomType::TripleIndividual.info().capacity, 3);
        assert_eq!(RoomType::TripleIndividual.label(), "Triple (3 Individuales)");
    }

    #[test]
    fn test_room_type_serde_matches_id() {
        for room in RoomType::all() {
            let json = serde_json::to_string(room).unwrap();
            assert_eq!(json, format!("\"{}\"", room.id()));
        }
    }

    // ─── Draft Tests ─────────────────────────────────────────

    #[test]
    fn test_draft_default_is_empty() {
        let draft = ReservationDraft::default();
        assert!(draft.is_empty());
        assert_eq!(draft.guest_count, 1);
        assert!(draft.room_type.is_none());
    }

    #[test]
    fn test_draft_apply_touches_one_field() {
        let mut draft = ReservationDraft::default();
        draft.apply(DraftField::Email("x@y.com".to_string()));
        assert_eq!(draft.email, "x@y.com");
        assert!(draft.guest_name.is_empty());
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_draft_validate_complete() {
        let req = complete_draft().validate(today()).unwrap();
        assert_eq!(req.guest_name, "Ana");
        assert_eq!(req.room_type, RoomType::Doble);
        assert_eq!(req.guest_count, 2);
    }

    #[test]
    fn test_draft_validate_reports_each_missing_field() {
        let errors = ReservationDraft::default().validate(today()).unwrap_err();
        let fields: Vec<FieldName> = errors.iter().map(|e| e.field()).collect();
        for f in [
            FieldName::GuestName,
            FieldName::Email,
            FieldName::Phone,
            FieldName::RoomType,
            FieldName::CheckIn,
            FieldName::CheckOut,
        ] {
            assert!(fields.contains(&f), "missing error for {:?}", f);
        }
    }

    #[test]
    fn test_draft_validate_whitespace_name_is_missing() {
        let mut draft = complete_draft();
        draft.guest_name = "   ".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Missing(FieldName::GuestName)]);
    }

    #[test]
    fn test_draft_validate_guest_count_bounds() {
        let mut draft = complete_draft();
        draft.guest_count = 0;
        assert_eq!(
            draft.validate(today()).unwrap_err(),
            vec![ValidationError::GuestCountOutOfRange(0)]
        );
        draft.guest_count = 4;
        assert!(draft.validate(today()).is_err());
        draft.guest_count = 3;
        assert!(draft.validate(today()).is_ok());
    }

    #[test]
    fn test_draft_validate_checkout_before_checkin() {
        let mut draft = complete_draft();
        draft.check_out = Some(date("2025-05-31"));
        let errors = draft.validate(today()).unwrap_err();
        assert!(matches!(errors[0], ValidationError::CheckOutBeforeCheckIn { .. }));
        assert_eq!(errors[0].field(), FieldName::CheckOut);
    }

    #[test]
    fn test_draft_validate_same_day_accepted() {
        let mut draft = complete_draft();
        draft.check_out = draft.check_in;
        assert!(draft.validate(today()).is_ok());
    }

    #[test]
    fn test_draft_validate_check_in_before_today() {
        let mut draft = complete_draft();
        draft.check_in = Some(date("2025-05-19"));
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CheckInInPast {
                check_in: date("2025-05-19"),
                today: today(),
            }]
        );
        assert_eq!(errors[0].field(), FieldName::CheckIn);

        // a stay that was fine yesterday is refused once its check-in passed
        assert!(complete_draft().validate(date("2025-06-02")).is_err());
    }

    #[test]
    fn test_draft_validate_check_in_today_accepted() {
        let mut draft = complete_draft();
        draft.check_in = Some(today());
        assert!(draft.validate(today()).is_ok());
    }

    #[test]
    fn test_draft_min_dates() {
        let today = date("2025-05-20");
        let mut draft = ReservationDraft::default();
        assert_eq!(draft.min_check_in(today), today);
        assert_eq!(draft.min_check_out(today), today);
        draft.check_in = Some(date("2025-06-01"));
        assert_eq!(draft.min_check_out(today), date("2025-06-01"));
    }

    #[test]
    fn test_draft_quote_request() {
        let mut draft = ReservationDraft::default();
        assert!(draft.quote_request().is_none());
        draft.room_type = Some(RoomType::Matrimonial);
        draft.check_in = Some(date("2025-06-01"));
        assert!(draft.quote_request().is_none());
        draft.check_out = Some(date("2025-06-04"));
        let q = draft.quote_request().unwrap();
        assert_eq!(q.room_type, RoomType::Matrimonial);
        draft.check_out = Some(date("2025-05-01"));
        assert!(draft.quote_request().is_none());
    }

    #[test]
    fn test_draft_field_affects_price() {
        assert!(DraftField::RoomType(None).affects_price());
        assert!(DraftField::CheckIn(None).affects_price());
        assert!(!DraftField::Email(String::new()).affects_price());
        assert!(!DraftField::GuestCount(2).affects_price());
    }

    #[test]
    fn test_reservation_request_wire_names() {
        let req = complete_draft().validate(today()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["telefono"], "1234");
        assert_eq!(json["tipo_habitacion"], "doble");
        assert_eq!(json["fecha_checkin"], "2025-06-01");
        assert_eq!(json["fecha_checkout"], "2025-06-03");
        assert_eq!(json["huespedes"], 2);
    }

    #[test]
    fn test_price_quote_deserialize() {
        let q: PriceQuote = serde_json::from_str(
            r#"{"noches": 3, "precio_total": 75000, "precio_promedio_noche": 25000.0}"#,
        )
        .unwrap();
        assert_eq!(q.nights, 3);
        assert_eq!(q.total_price, 75000.0);
    }

    // ─── Currency Formatting Tests ───────────────────────────

    #[test]
    fn test_format_ars() {
        assert_eq!(format_ars(0.0), "0");
        assert_eq!(format_ars(999.0), "999");
        assert_eq!(format_ars(56000.0), "56.000");
        assert_eq!(format_ars(1234567.0), "1.234.567");
        assert_eq!(format_ars(1234.5), "1.234,5");
        assert_eq!(format_ars(1234.56), "1.234,56");
        assert_eq!(format_ars(-2500.0), "-2.500");
    }

    #[test]
    fn test_format_ars_keeps_three_decimals() {
        assert_eq!(format_ars(18666.666666), "18.666,667");
        assert_eq!(format_ars(1234.125), "1.234,125");
        assert_eq!(format_ars(0.0004), "0");
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.speech.lang, "es-AR");
    }

    #[test]
    fn test_config_endpoints() {
        let api = ApiConfig {
            base_url: "https://hotel.example/".to_string(),
        };
        assert_eq!(api.chat_url(), "https://hotel.example/api/chat");
        assert_eq!(api.reservation_url(), "https://hotel.example/api/reservar");
        assert_eq!(api.quote_url(), "https://hotel.example/api/calcular-precio");
        assert_eq!(api.health_url(), "https://hotel.example/api/health");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let e = BellbotError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 500: boom");
        assert_eq!(
            BellbotError::Network("offline".to_string()).to_string(),
            "Network error: offline"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: BellbotError = serde_json::from_str::<serde_json::Value>("{bad")
            .unwrap_err()
            .into();
        assert!(matches!(err, BellbotError::Decode(_)));
    }

    #[test]
    fn test_validation_error_messages() {
        let e = ValidationError::Missing(FieldName::Email);
        assert_eq!(e.to_string(), "Email es obligatorio");
    }
}
