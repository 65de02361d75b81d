//! Chat panel: displays conversation messages, suggestion chips, and the
//! input field.

use egui::{self, text::LayoutJob, Align, FontId, Layout, RichText, ScrollArea, Stroke, TextFormat, Vec2};
use chat_core::format::format_markup;
use chat_types::message::Message;
use crate::state::UiState;
use crate::theme::*;

const BODY_SIZE: f32 = 14.0;

/// Render the chat panel. Returns Some(text) when the user submits input
/// or clicks a suggestion chip.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let clear_btn = ui.add_enabled(
                            state.session_id.is_some(),
                            egui::Button::new(
                                RichText::new("Clear chat").color(TEXT_SECONDARY).small(),
                            ),
                        );
                        if clear_btn.clicked() {
                            state.request_clear();
                        }

                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Messages area
                let chips_enabled = !state.is_busy();
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.messages.is_empty() && !state.is_busy() {
                            ui.label(
                                RichText::new("Say hello to start the conversation.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }

                        for message in &state.messages {
                            if let Some(chip) = render_message(ui, message, chips_enabled) {
                                submitted = Some(chip);
                            }
                            ui.add_space(6.0);
                        }

                        if state.is_busy() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(RichText::new("Typing...").color(TEXT_SECONDARY).small());
                            });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(FontId::proportional(BODY_SIZE));

                    let response = ui.add(input);

                    let send_enabled = state.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enter || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            submitted = Some(text);
                        }
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

/// Draw one bubble plus its chips. Returns the text of a clicked chip.
fn render_message(ui: &mut egui::Ui, message: &Message, chips_enabled: bool) -> Option<String> {
    let (fill, align) = if message.is_user() {
        (USER_BUBBLE, Align::Max)
    } else {
        (BOT_BUBBLE, Align::Min)
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH;
    let mut clicked = None;

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(markup_job(&message.text, max_width));
                let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M");
                ui.label(RichText::new(time.to_string()).color(TEXT_SECONDARY).small());
            });

        if !message.chips.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.set_max_width(max_width);
                for chip in &message.chips {
                    let button = egui::Button::new(RichText::new(chip).color(TEXT_PRIMARY).small())
                        .fill(CHIP_FILL)
                        .stroke(Stroke::new(1.0, CHIP_STROKE))
                        .corner_radius(BUBBLE_ROUNDING);
                    if ui.add_enabled(chips_enabled, button).clicked() {
                        clicked = Some(chip.clone());
                    }
                }
            });
        }
    });

    clicked
}

/// Lay out message text with `*emphasis*` runs highlighted.
pub fn markup_job(text: &str, wrap_width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for segment in format_markup(text) {
        if segment.text().is_empty() {
            continue;
        }
        let format = if segment.is_emphasis() {
            TextFormat {
                font_id: FontId::proportional(BODY_SIZE),
                color: TEXT_EMPHASIS,
                italics: true,
                ..Default::default()
            }
        } else {
            TextFormat {
                font_id: FontId::proportional(BODY_SIZE),
                color: TEXT_PRIMARY,
                ..Default::default()
            }
        };
        job.append(segment.text(), 0.0, format);
    }

    job
}
