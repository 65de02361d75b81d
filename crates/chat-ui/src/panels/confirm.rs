//! Clear-chat confirmation dialog.

use egui::{self, Align2, RichText, Vec2};
use crate::state::UiState;
use crate::theme::*;

/// Show the confirmation while requested. Returns true on the frame the
/// user confirms.
pub fn confirm_clear_dialog(ctx: &egui::Context, state: &mut UiState) -> bool {
    if !state.confirm_clear {
        return false;
    }

    let mut confirmed = false;
    let mut cancelled = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    egui::Window::new("Clear chat?")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(
                RichText::new("This starts a new conversation. Saved messages are not deleted.")
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(RichText::new("Clear").color(ERROR)).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed || cancelled {
        return state.resolve_clear(confirmed);
    }
    false
}
