//! Chat window rendering.

use eframe::egui;
use egui::{RichText, ScrollArea};
use folio::{ChatPhase, Role, ThemeColors};

use crate::app::AppState;

/// Result of user interaction with the chat window
pub enum ChatInteraction {
    Send,
    ResetAndRetry,
    Closed,
}

/// Renders the floating chat window when it is open.
pub fn render_chat_window(ctx: &egui::Context, state: &mut AppState) -> Option<ChatInteraction> {
    if !state.chat.is_open() {
        return None;
    }

    let colors = state.theme.colors().clone();
    let title = format!("Chat with {}", state.portfolio.profile.name);
    let mut open = true;
    let mut interaction = None;

    let window = egui::Window::new(title)
        .id(egui::Id::new("chat_window"))
        .open(&mut open)
        .default_width(360.0)
        .default_height(460.0)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
        .collapsible(false)
        .show(ctx, |ui| {
            interaction = render_chat_contents(ui, state, &colors);
        });
    if let Some(window) = window {
        state.layout.add_floating(window.response.rect);
    }

    if !open {
        return Some(ChatInteraction::Closed);
    }
    interaction
}

fn render_chat_contents(ui: &mut egui::Ui, state: &mut AppState, colors: &ThemeColors) -> Option<ChatInteraction> {
    let mut interaction = None;
    let input_height = 72.0;

    ScrollArea::vertical()
        .id_salt("chat_transcript")
        .max_height((ui.available_height() - input_height).max(120.0))
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in state.chat.session().messages() {
                let time = message.sent_at.format("%H:%M").to_string();
                match message.role {
                    Role::Assistant => {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            bubble(ui, &message.content, colors.card_background, colors);
                            ui.label(RichText::new(time).small().color(colors.text_muted));
                        });
                    }
                    Role::User => {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                            bubble(ui, &message.content, folio::with_alpha(colors.accent, 60), colors);
                            let receipt = if message.read { "✓✓" } else { "✓" };
                            ui.label(RichText::new(format!("{} {}", time, receipt)).small().color(colors.text_muted));
                        });
                    }
                }
                ui.add_space(6.0);
            }

            if state.chat.session().is_typing() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("typing...").italics().color(colors.text_muted));
                });
            }
        });

    ui.separator();

    if let ChatPhase::Failed { message } = state.chat.session().phase() {
        ui.colored_label(colors.error, message.as_str());
        if ui.button("↻ Reset and retry").clicked() {
            interaction = Some(ChatInteraction::ResetAndRetry);
        }
        return interaction;
    }

    let can_send = state.chat.session().can_send();
    let max_chars = state.chat.session().max_input_chars();
    let remaining = state.chat.remaining_chars();

    ui.horizontal(|ui| {
        let input_width = ui.available_width() - 64.0;
        let response = ui.add(
            egui::TextEdit::singleline(state.chat.draft_mut())
                .char_limit(max_chars)
                .hint_text("Ask about my work...")
                .desired_width(input_width),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let send = ui.add_enabled(can_send, egui::Button::new("Send"));
        if can_send && (send.clicked() || submitted) {
            interaction = Some(ChatInteraction::Send);
            response.request_focus();
        }
    });

    let counter_color = if remaining == 0 { colors.warning } else { colors.text_muted };
    ui.label(RichText::new(format!("{} / {}", max_chars - remaining, max_chars)).small().color(counter_color));

    interaction
}

fn bubble(ui: &mut egui::Ui, text: &str, fill: egui::Color32, colors: &ThemeColors) {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, colors.border))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_max_width(260.0);
            ui.label(text);
        });
}
