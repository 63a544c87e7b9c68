//! One-tap prompts shown under the thread while the form is closed.

use egui::{self, Button, RichText, ScrollArea};
use bellbot_core::conversation::QuickAction;
use crate::theme::*;

/// Requests made from here may overlap one already in flight.
pub fn quick_actions_panel(ui: &mut egui::Ui) -> Option<QuickAction> {
    let mut chosen = None;

    ScrollArea::horizontal()
        .id_salt("quick_actions")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for action in QuickAction::all() {
                    let button = Button::new(RichText::new(action.text()).color(TEXT_PRIMARY).small())
                        .fill(BG_SECONDARY)
                        .corner_radius(PILL_ROUNDING);
                    if ui.add(button).clicked() {
                        chosen = Some(*action);
                    }
                }
            });
        });

    chosen
}
