//! Status bar UI rendering
//!
//! Bottom line with navigation progress, gate state, and background activity.

use eframe::egui;
use egui::RichText;
use folio::ChatPhase;

use crate::app::AppState;
use crate::io::PendingRequests;

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, pending: PendingRequests) {
    let colors = state.theme.colors();
    let nav_state = state.navigation.state();
    let count = nav_state.section_count();

    ui.horizontal(|ui| {
        let visited = (0..count).filter(|&i| nav_state.has_visited(i)).count();
        let completed = (0..count).filter(|&i| nav_state.has_completed(i)).count();
        ui.label(RichText::new(format!("Visited {}/{} | Read {}/{}", visited, count, completed, count)).strong());

        ui.label(RichText::new("|").strong());
        if nav_state.is_transitioning() {
            ui.label(RichText::new("Moving...").color(colors.text_muted));
        } else if nav_state.is_section_complete() {
            ui.label(RichText::new("Ready").color(colors.success));
        } else {
            ui.label(RichText::new("Keep scrolling").color(colors.warning));
        }

        if pending.any() {
            ui.label(RichText::new("|").strong());
            ui.spinner();
            let what = match (pending.chat, pending.mail) {
                (true, true) => "Waiting on chat and mail",
                (true, false) => "Waiting on chat",
                _ => "Sending message",
            };
            ui.label(what);
        }

        if matches!(state.chat.session().phase(), ChatPhase::Failed { .. }) {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new("Chat offline").color(colors.error));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("↑/↓ move | Home/End jump").small().color(colors.text_muted));
        });
    });
}
