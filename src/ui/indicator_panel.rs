//! Section indicator: one dot per section plus a progress strip.

use eframe::egui;
use folio::{indicator, ThemeColors};

use crate::app::AppState;
use crate::presentation::color_mapping;

const DOT_RADIUS: f32 = 6.0;
const DOT_SPACING: f32 = 28.0;
const PROGRESS_STEPS: usize = 32;

/// Draws the vertical dot column. Returns the index of a clicked,
/// reachable dot.
pub fn render_indicator(ui: &mut egui::Ui, state: &AppState) -> Option<usize> {
    let colors = state.theme.colors();
    let entries = indicator::entries(&state.navigation);
    let mut clicked = None;

    let column_height = DOT_SPACING * entries.len() as f32;
    let top_pad = ((ui.available_height() - column_height) / 2.0).max(0.0);
    ui.add_space(top_pad);

    ui.vertical_centered(|ui| {
        for entry in &entries {
            let sense = if entry.is_reachable {
                egui::Sense::click()
            } else {
                egui::Sense::hover()
            };
            let (rect, response) = ui.allocate_exact_size(egui::vec2(DOT_SPACING, DOT_SPACING), sense);

            let fill = color_mapping::indicator_color(entry, colors);
            let radius = if entry.is_active || response.hovered() {
                DOT_RADIUS * 1.4
            } else {
                DOT_RADIUS
            };
            ui.painter().circle_filled(rect.center(), radius, fill);
            if entry.is_active {
                ui.painter().circle_stroke(
                    rect.center(),
                    radius + 3.0,
                    egui::Stroke::new(1.5, colors.accent_secondary),
                );
            }

            let hover = if entry.is_reachable {
                entry.title.clone()
            } else {
                format!("{} (locked)", entry.title)
            };
            if response.on_hover_text(hover).clicked() {
                clicked = Some(entry.index);
            }
        }
    });

    clicked
}

/// Thin gradient strip showing how far through the sections we are.
pub fn render_progress_strip(ui: &mut egui::Ui, state: &AppState) {
    let fraction = indicator::progress_fraction(state.navigation.state());
    let colors = state.theme.colors();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 3.0), egui::Sense::hover());

    ui.painter().rect_filled(rect, 0.0, colors.border);
    paint_gradient(ui.painter(), rect, fraction, colors);
}

fn paint_gradient(painter: &egui::Painter, rect: egui::Rect, fraction: f32, colors: &ThemeColors) {
    let filled = rect.width() * fraction.clamp(0.0, 1.0);
    if filled <= 0.0 {
        return;
    }

    let step = filled / PROGRESS_STEPS as f32;
    for i in 0..PROGRESS_STEPS {
        let x0 = rect.left() + step * i as f32;
        let segment = egui::Rect::from_min_max(egui::pos2(x0, rect.top()), egui::pos2(x0 + step, rect.bottom()));
        let t = i as f32 / (PROGRESS_STEPS - 1) as f32;
        painter.rect_filled(segment, 0.0, color_mapping::progress_gradient(t, colors));
    }
}
