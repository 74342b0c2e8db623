//! Section panels.
//!
//! Each section draws into the central panel. Everything except the home
//! section sits inside a vertical scroll area whose geometry is recorded
//! after drawing, so the completion gate always sees the latest frame.

use eframe::egui;
use folio::{ScrollMetrics, SectionKind, ThemeColors};

use crate::app::AppState;

mod home;
mod education;
mod skills;
mod projects;
mod contact;

/// Result of user interaction inside a section.
pub enum SectionInteraction {
    OpenChat,
    SubmitContact,
}

/// Draws section `index` and records its scroll geometry.
pub fn render_section(ui: &mut egui::Ui, state: &mut AppState, index: usize) -> Option<SectionInteraction> {
    let kind = *state.navigation.registry().get(index)?.kind();
    let colors = state.theme.colors().clone();

    if kind == SectionKind::Home {
        state.scroll.record_static(index);
        return home::render(ui, &state.portfolio, &colors);
    }

    let portfolio = &state.portfolio;
    let contact_state = &mut state.contact;
    let showcase = &mut state.showcase;

    let output = egui::ScrollArea::vertical()
        .id_salt(("section_scroll", index))
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(24.0);
            let interaction = match kind {
                SectionKind::Education => {
                    education::render(ui, portfolio, &colors);
                    None
                }
                SectionKind::Skills => {
                    skills::render(ui, portfolio, showcase, &colors);
                    None
                }
                SectionKind::Projects => {
                    projects::render(ui, portfolio, showcase, &colors);
                    None
                }
                SectionKind::Contact => contact::render(ui, contact_state, portfolio, &colors),
                SectionKind::Home => None,
            };
            ui.add_space(24.0);
            interaction
        });

    state.scroll.record(
        index,
        ScrollMetrics::new(output.state.offset.y, output.content_size.y, output.inner_rect.height()),
    );

    output.inner
}

/// Section heading with a muted kicker line above it.
fn section_heading(ui: &mut egui::Ui, kicker: &str, title: &str, colors: &ThemeColors) {
    ui.label(egui::RichText::new(kicker.to_uppercase()).small().color(colors.accent));
    ui.label(egui::RichText::new(title).size(32.0).strong().color(colors.text_strong));
    ui.add_space(16.0);
}

/// Rounded card used by the list sections.
fn card<R>(ui: &mut egui::Ui, colors: &ThemeColors, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::NONE
        .fill(colors.card_background)
        .stroke(egui::Stroke::new(1.0, colors.border))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Horizontally centred column of at most `max_width`.
fn centered_column<R>(ui: &mut egui::Ui, max_width: f32, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let width = ui.available_width().min(max_width);
    let margin = ((ui.available_width() - width) / 2.0).max(0.0);
    ui.horizontal(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui)
        })
        .inner
    })
    .inner
}
