//! Reservation form panel.
//!
//! Edits land in `UiState::form` first and are reported back as typed
//! `DraftField` actions; the reservation flow stays the owner of the draft.

use chrono::NaiveDate;
use egui::{self, Button, ComboBox, DragValue, RichText, TextEdit, Vec2};
use bellbot_types::{
    catalog::RoomType,
    event::FlowState,
    reservation::{format_ars, DraftField, FieldName, ValidationError, MAX_GUESTS, MIN_GUESTS},
};
use crate::state::{format_date, parse_date, UiState};
use crate::theme::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edit(DraftField),
    Submit,
    Cancel,
}

/// Render the form. `today` bounds the selectable dates.
pub fn reservation_panel(ui: &mut egui::Ui, state: &mut UiState, today: NaiveDate) -> Vec<FormAction> {
    let mut actions = Vec::new();
    let submitting = state.flow_state == FlowState::Submitting;
    let editable = state.form_editable();
    let errors = state.validation_errors.clone();
    let quote = state.quote.clone();
    let form = &mut state.form;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Completar Reserva").color(TEXT_PRIMARY).strong());
            ui.separator();

            ui.add_enabled_ui(editable, |ui| {
                egui::Grid::new("reservation_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        field_label(ui, FieldName::GuestName);
                        ui.vertical(|ui| {
                            if ui.text_edit_singleline(&mut form.draft.guest_name).changed() {
                                actions.push(FormAction::Edit(DraftField::GuestName(
                                    form.draft.guest_name.clone(),
                                )));
                            }
                            error_line(ui, &errors, FieldName::GuestName);
                        });
                        ui.end_row();

                        field_label(ui, FieldName::Email);
                        ui.vertical(|ui| {
                            if ui.text_edit_singleline(&mut form.draft.email).changed() {
                                actions.push(FormAction::Edit(DraftField::Email(form.draft.email.clone())));
                            }
                            error_line(ui, &errors, FieldName::Email);
                        });
                        ui.end_row();

                        field_label(ui, FieldName::Phone);
                        ui.vertical(|ui| {
                            if ui.text_edit_singleline(&mut form.draft.phone).changed() {
                                actions.push(FormAction::Edit(DraftField::Phone(form.draft.phone.clone())));
                            }
                            error_line(ui, &errors, FieldName::Phone);
                        });
                        ui.end_row();

                        field_label(ui, FieldName::RoomType);
                        ui.vertical(|ui| {
                            let selected = form
                                .draft
                                .room_type
                                .map(|r| r.label())
                                .unwrap_or("Seleccionar...");
                            ComboBox::from_id_salt("room_type")
                                .selected_text(selected)
                                .show_ui(ui, |ui| {
                                    for room in RoomType::all() {
                                        if ui
                                            .selectable_value(&mut form.draft.room_type, Some(*room), room.label())
                                            .changed()
                                        {
                                            actions.push(FormAction::Edit(DraftField::RoomType(Some(*room))));
                                        }
                                    }
                                });
                            error_line(ui, &errors, FieldName::RoomType);
                        });
                        ui.end_row();

                        let min_in = form.draft.min_check_in(today);
                        field_label(ui, FieldName::CheckIn);
                        ui.vertical(|ui| {
                            if date_input(ui, &mut form.check_in_text, min_in) {
                                let date = parse_date(&form.check_in_text);
                                form.draft.check_in = date;
                                actions.push(FormAction::Edit(DraftField::CheckIn(date)));
                            }
                            error_line(ui, &errors, FieldName::CheckIn);
                        });
                        ui.end_row();

                        let min_out = form.draft.min_check_out(today);
                        field_label(ui, FieldName::CheckOut);
                        ui.vertical(|ui| {
                            if date_input(ui, &mut form.check_out_text, min_out) {
                                let date = parse_date(&form.check_out_text);
                                form.draft.check_out = date;
                                actions.push(FormAction::Edit(DraftField::CheckOut(date)));
                            }
                            error_line(ui, &errors, FieldName::CheckOut);
                        });
                        ui.end_row();

                        field_label(ui, FieldName::GuestCount);
                        ui.vertical(|ui| {
                            let drag = DragValue::new(&mut form.draft.guest_count).range(MIN_GUESTS..=MAX_GUESTS);
                            if ui.add(drag).changed() {
                                actions.push(FormAction::Edit(DraftField::GuestCount(form.draft.guest_count)));
                            }
                            error_line(ui, &errors, FieldName::GuestCount);
                        });
                        ui.end_row();
                    });
            });

            if let Some(quote) = &quote {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "{} noches · Total ${} (promedio ${} por noche)",
                        quote.nights,
                        format_ars(quote.total_price),
                        format_ars(quote.average_per_night),
                    ))
                    .color(ACCENT)
                    .strong(),
                );
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let label = if submitting { "Procesando..." } else { "Confirmar Reserva" };
                let submit = ui.add_enabled(
                    !submitting,
                    Button::new(RichText::new(label).color(TEXT_ON_ACCENT).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(160.0, 32.0)),
                );
                if submit.clicked() {
                    actions.push(FormAction::Submit);
                }

                let cancel = ui.add_enabled(
                    !submitting,
                    Button::new(RichText::new("Cancelar").color(TEXT_PRIMARY))
                        .fill(BG_SURFACE)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(90.0, 32.0)),
                );
                if cancel.clicked() {
                    actions.push(FormAction::Cancel);
                }
            });
        });

    actions
}

fn field_label(ui: &mut egui::Ui, field: FieldName) {
    ui.label(RichText::new(field.label()).color(TEXT_SECONDARY));
}

fn error_line(ui: &mut egui::Ui, errors: &[ValidationError], field: FieldName) {
    if let Some(err) = errors.iter().find(|e| e.field() == field) {
        ui.label(RichText::new(err.to_string()).color(ERROR).small());
    }
}

/// Text date input. Returns true when the text changed.
fn date_input(ui: &mut egui::Ui, text: &mut String, min: NaiveDate) -> bool {
    let changed = ui
        .add(
            TextEdit::singleline(text)
                .hint_text(format!("AAAA-MM-DD, desde {}", format_date(Some(min))))
                .desired_width(180.0),
        )
        .changed();

    if !text.trim().is_empty() {
        match parse_date(text) {
            None => {
                ui.label(RichText::new("Formato AAAA-MM-DD").color(WARNING).small());
            }
            Some(date) if date < min => {
                ui.label(
                    RichText::new(format!("Elegí una fecha desde {}", format_date(Some(min))))
                        .color(WARNING)
                        .small(),
                );
            }
            Some(_) => {}
        }
    }

    changed
}
