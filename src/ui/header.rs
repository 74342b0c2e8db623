//! Header panel UI rendering
//!
//! Handles the top bar with the owner's name, previous/next buttons,
//! chat toggle, motion preference, and theme selector.

use eframe::egui;
use egui::RichText;

use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    PreviousClicked,
    NextClicked,
    ChatToggled,
    ReducedMotionChanged(bool),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let colors = state.theme.colors().clone();

    ui.horizontal(|ui| {
        ui.label(RichText::new(&state.portfolio.profile.name).strong().color(colors.text_strong));
        ui.separator();

        let nav = &state.navigation;
        let locked = nav.state().is_transitioning();

        if ui
            .add_enabled(nav.can_retreat() && !locked, egui::Button::new("⏶"))
            .on_hover_text("Previous section (↑)")
            .clicked()
        {
            interaction = Some(HeaderInteraction::PreviousClicked);
        }

        if let Some(section) = nav.active_section() {
            ui.label(format!(
                "{} / {}  {}",
                nav.active_index() + 1,
                nav.registry().len(),
                section.title()
            ));
        }

        // Enabled even when gated, so a click can raise the hint
        let has_next = nav.active_index() < nav.registry().last_index();
        let next = ui
            .add_enabled(has_next && !locked, egui::Button::new("⏷"))
            .on_hover_text(if nav.can_advance() {
                "Next section (↓)"
            } else {
                "Read to the end of this section first"
            });
        if next.clicked() {
            interaction = Some(HeaderInteraction::NextClicked);
        }

        ui.separator();

        let chat_label = if state.chat.is_open() { "💬 Hide chat" } else { "💬 Chat" };
        if ui.selectable_label(state.chat.is_open(), chat_label).clicked() {
            interaction = Some(HeaderInteraction::ChatToggled);
        }

        // Push preferences to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");
            ui.separator();

            let mut reduced_motion = state.preferences.reduced_motion;
            if ui.checkbox(&mut reduced_motion, "Reduce motion").changed() {
                interaction = Some(HeaderInteraction::ReducedMotionChanged(reduced_motion));
            }
        });
    });

    interaction
}
