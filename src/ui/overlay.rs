//! Floating overlays: the "keep reading" hint and notice toasts.

use std::time::Instant;

use eframe::egui;
use egui::RichText;

use crate::app::AppState;
use crate::presentation::color_mapping;

/// Result of user interaction with an overlay
pub enum OverlayInteraction {
    HintDismissed,
    NoticeDismissed(usize),
}

/// Shows the hint raised by a blocked forward move, anchored above the
/// bottom edge.
pub fn render_scroll_hint(ctx: &egui::Context, state: &mut AppState, now: Instant) -> Option<OverlayInteraction> {
    if !state.navigation.hint_visible(now) {
        return None;
    }

    let colors = state.theme.colors().clone();
    let colors = &colors;
    let mut interaction = None;

    let area = egui::Area::new(egui::Id::new("scroll_hint"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(color_mapping::toast_background(colors))
                .stroke(egui::Stroke::new(1.0, colors.accent))
                .corner_radius(20.0)
                .inner_margin(egui::Margin::symmetric(16, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("↓").strong().color(colors.accent));
                        ui.label("Scroll to the end of this section to continue");
                        if ui.small_button("✕").clicked() {
                            interaction = Some(OverlayInteraction::HintDismissed);
                        }
                    });
                });
        });
    state.layout.add_floating(area.response.rect);

    interaction
}

/// Stacks live notices in the top-right corner, newest at the bottom.
///
/// Expects the board to have been pruned for `now`, so the visible list
/// lines up with the board's indices.
pub fn render_notices(ctx: &egui::Context, state: &mut AppState, now: Instant) -> Option<OverlayInteraction> {
    if state.notices.is_empty() {
        return None;
    }

    let colors = state.theme.colors().clone();
    let colors = &colors;
    let notices = &state.notices;
    let mut interaction = None;

    let area = egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 48.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for (index, notice) in notices.visible(now).enumerate() {
                let accent = color_mapping::notice_color(notice.kind, colors);
                egui::Frame::NONE
                    .fill(color_mapping::toast_background(colors))
                    .stroke(egui::Stroke::new(1.0, accent))
                    .corner_radius(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&notice.title).strong().color(accent));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✕").clicked() {
                                    interaction = Some(OverlayInteraction::NoticeDismissed(index));
                                }
                            });
                        });
                        if !notice.body.is_empty() {
                            ui.label(&notice.body);
                        }
                    });
                ui.add_space(8.0);
            }
        });
    state.layout.add_floating(area.response.rect);

    interaction
}
