//! Chat panel: the message thread and the input bar.

use egui::{self, Align, Button, Key, Layout, RichText, ScrollArea, Vec2};
use bellbot_types::{catalog::RoomType, message::Message};
use crate::state::UiState;
use crate::theme::*;

/// What the user asked for from the input bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// Send the input buffer
    Send,
    ToggleMic,
    ToggleReservation,
}

/// Render the message thread, newest at the bottom.
pub fn thread_panel(ui: &mut egui::Ui, state: &UiState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);
            for message in &state.messages {
                render_message(ui, message);
                ui.add_space(8.0);
            }

            if state.is_busy() {
                typing_indicator(ui);
            }
        });
}

/// Render the input bar. Returns the action the user triggered, if any.
pub fn input_bar(ui: &mut egui::Ui, state: &mut UiState) -> Option<ChatAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if state.speech_available {
            let (label, fill, hint) = if state.listening {
                ("⏹", ERROR, "Detener")
            } else {
                ("🎤", BG_SURFACE, "Hablar")
            };
            let mic = ui
                .add(
                    Button::new(RichText::new(label).size(16.0))
                        .fill(fill)
                        .corner_radius(PILL_ROUNDING)
                        .min_size(Vec2::new(36.0, 32.0)),
                )
                .on_hover_text(hint);
            if mic.clicked() {
                action = Some(ChatAction::ToggleMic);
            }
        }

        let input_enabled = state.input_enabled();
        let input = egui::TextEdit::singleline(&mut state.input_text)
            .hint_text("Escribe tu mensaje o usa el micrófono...")
            .desired_width(ui.available_width() - 120.0)
            .font(egui::FontId::proportional(14.0));
        let response = ui.add_enabled(input_enabled, input);

        let send_enabled = state.can_send();
        let send_btn = ui.add_enabled(
            send_enabled,
            Button::new(RichText::new("Enviar").color(TEXT_ON_ACCENT))
                .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                .corner_radius(PILL_ROUNDING)
                .min_size(Vec2::new(60.0, 32.0)),
        );

        // Submit on Enter or button click
        if (response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) && send_enabled)
            || send_btn.clicked()
        {
            action = Some(ChatAction::Send);
            response.request_focus();
        }

        let calendar = ui
            .add(
                Button::new(RichText::new("📅").size(16.0))
                    .fill(SUCCESS)
                    .corner_radius(PILL_ROUNDING)
                    .min_size(Vec2::new(36.0, 32.0)),
            )
            .on_hover_text("Reservar");
        if calendar.clicked() {
            action = Some(ChatAction::ToggleReservation);
        }
    });

    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Presiona el micrófono para hablar o escribe tu mensaje")
                .color(TEXT_SECONDARY)
                .small(),
        );
    });

    action
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (fill, text_color, layout) = if message.is_user() {
        (ACCENT, TEXT_ON_ACCENT, Layout::right_to_left(Align::Min))
    } else {
        (BG_SECONDARY, TEXT_PRIMARY, Layout::left_to_right(Align::Min))
    };
    let max_width = ui.available_width() * 0.8;

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.label(RichText::new(&message.content).color(text_color));

                    for room in &message.room_refs {
                        ui.add_space(6.0);
                        room_card(ui, *room);
                    }

                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(message.display_time())
                            .color(text_color.linear_multiply(0.7))
                            .small(),
                    );
                });
            });
    });
}

fn room_card(ui: &mut egui::Ui, room: RoomType) {
    let info = room.info();
    egui::Frame::default()
        .fill(BG_CARD)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(info.display_name).color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new(format!("Capacidad: {} personas", info.capacity))
                    .color(TEXT_SECONDARY)
                    .small(),
            );
            ui.hyperlink_to("Ver foto", info.image_url);
        });
}

fn typing_indicator(ui: &mut egui::Ui) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("BellBot está escribiendo...").color(TEXT_SECONDARY).small());
            });
        });
}
