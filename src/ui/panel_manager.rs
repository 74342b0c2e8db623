//! Panel orchestration and layout management.
//!
//! Lays out the header, indicator column, status bar, fullscreen section,
//! chat window, and overlays, and funnels their interactions into one
//! `PanelInteraction` for the application to handle.

use std::time::Instant;

use folio::TransitionDirection;

use crate::app::AppState;
use crate::io::RequestDispatcher;
use crate::ui::chat_panel::{self, ChatInteraction};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::overlay::{self, OverlayInteraction};
use crate::ui::sections::{self, SectionInteraction};
use crate::ui::{indicator_panel, project_window, status_bar};

/// How far (as a fraction of the panel height) an incoming section starts
/// from its resting place.
const SLIDE_DISTANCE: f32 = 0.25;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    PreviousRequested,
    NextRequested,
    /// A reachable indicator dot was clicked
    SectionRequested(usize),
    ChatToggled,
    ChatClosed,
    ChatSendRequested,
    ChatRetryRequested,
    ContactSubmitRequested,
    ReducedMotionChanged(bool),
    HintDismissed,
    NoticeDismissed(usize),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        dispatcher: &RequestDispatcher,
        now: Instant,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        state.layout.clear_floating();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    HeaderInteraction::PreviousClicked => PanelInteraction::PreviousRequested,
                    HeaderInteraction::NextClicked => PanelInteraction::NextRequested,
                    HeaderInteraction::ChatToggled => PanelInteraction::ChatToggled,
                    HeaderInteraction::ReducedMotionChanged(enabled) => PanelInteraction::ReducedMotionChanged(enabled),
                });
            }
            indicator_panel::render_progress_strip(ui, state);
        });

        if state.preferences.show_status_bar {
            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                status_bar::render_status_bar(ui, state, dispatcher.pending());
            });
        }

        egui::SidePanel::right("indicator_panel")
            .exact_width(state.layout.indicator_width())
            .resizable(false)
            .show(ctx, |ui| {
                if let Some(index) = indicator_panel::render_indicator(ui, state) {
                    interaction = Some(PanelInteraction::SectionRequested(index));
                }
            });

        let section_frame = egui::Frame::default()
            .inner_margin(egui::Margin::symmetric(24, 0))
            .fill(state.theme.colors().background);

        egui::CentralPanel::default().frame(section_frame).show(ctx, |ui| {
            if let Some(section_interaction) = Self::render_active_section(ui, state, now) {
                interaction = Some(match section_interaction {
                    SectionInteraction::OpenChat => PanelInteraction::ChatToggled,
                    SectionInteraction::SubmitContact => PanelInteraction::ContactSubmitRequested,
                });
            }
        });

        project_window::render_project_window(ctx, state);

        if let Some(chat_interaction) = chat_panel::render_chat_window(ctx, state) {
            interaction = Some(match chat_interaction {
                ChatInteraction::Send => PanelInteraction::ChatSendRequested,
                ChatInteraction::ResetAndRetry => PanelInteraction::ChatRetryRequested,
                ChatInteraction::Closed => PanelInteraction::ChatClosed,
            });
        }

        let overlays = [
            overlay::render_scroll_hint(ctx, state, now),
            overlay::render_notices(ctx, state, now),
        ];
        for overlay_interaction in overlays.into_iter().flatten() {
            interaction = Some(match overlay_interaction {
                OverlayInteraction::HintDismissed => PanelInteraction::HintDismissed,
                OverlayInteraction::NoticeDismissed(index) => PanelInteraction::NoticeDismissed(index),
            });
        }

        interaction
    }

    /// Draws the active section, sliding and fading it in while a
    /// transition runs.
    fn render_active_section(ui: &mut egui::Ui, state: &mut AppState, now: Instant) -> Option<SectionInteraction> {
        let panel_rect = ui.max_rect();
        state.layout.set_section_rect(panel_rect);

        let (offset, opacity) = match state.navigation.state().transition() {
            Some(transition) => {
                let progress = transition.eased_progress(now);
                let sign = match transition.direction() {
                    TransitionDirection::Forward => 1.0,
                    TransitionDirection::Backward => -1.0,
                };
                (sign * (1.0 - progress) * panel_rect.height() * SLIDE_DISTANCE, progress)
            }
            None => (0.0, 1.0),
        };

        let index = state.navigation.active_index();
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .id_salt(("section", index))
                .max_rect(panel_rect.translate(egui::vec2(0.0, offset))),
        );
        child.set_clip_rect(panel_rect);
        child.multiply_opacity(opacity);

        sections::render_section(&mut child, state, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Preferences;
    use folio::{Portfolio, SiteConfig};

    fn state() -> AppState {
        AppState::new(
            SiteConfig::default(),
            Portfolio::bundled().unwrap(),
            "Dark".to_string(),
            Preferences::default(),
        )
        .unwrap()
    }

    fn run_frames(ctx: &egui::Context, state: &mut AppState, dispatcher: &RequestDispatcher, frames: usize) {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1200.0, 800.0));
        for _ in 0..frames {
            let input = egui::RawInput {
                screen_rect: Some(screen),
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                PanelManager::render_all_panels(ctx, state, dispatcher, Instant::now());
            });
        }
    }

    #[test]
    fn test_chat_window_blocks_section_wheel() {
        let ctx = egui::Context::default();
        let dispatcher = RequestDispatcher::default();
        let mut state = state();
        state.chat.set_open(true);

        run_frames(&ctx, &mut state, &dispatcher, 3);

        let section = state.layout.section_rect().unwrap();
        let chat = *state.layout.floating_rects().first().unwrap();
        assert!(section.intersects(chat));
        assert!(!state.layout.is_over_section(Some(chat.center())));
        assert!(state.layout.is_over_section(Some(section.min + egui::vec2(10.0, 10.0))));

        // Closing the chat gives the area back to the section
        state.chat.set_open(false);
        run_frames(&ctx, &mut state, &dispatcher, 1);
        assert!(state.layout.floating_rects().is_empty());
        assert!(state.layout.is_over_section(Some(chat.center())));
    }
}
