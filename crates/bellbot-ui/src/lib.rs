//! egui panels and the UI-side projection of session state.

pub mod panels;
pub mod state;
pub mod theme;
