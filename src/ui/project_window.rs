//! Project detail window, opened from a project card.

use eframe::egui;
use egui::RichText;
use folio::SectionKind;

use crate::app::AppState;
use crate::presentation::color_mapping;

/// Shows the selected project while the projects section is on screen.
pub fn render_project_window(ctx: &egui::Context, state: &mut AppState) {
    let on_projects = state
        .navigation
        .registry()
        .get(state.navigation.active_index())
        .is_some_and(|section| *section.kind() == SectionKind::Projects);
    if !on_projects {
        return;
    }

    let Some(project) = state
        .showcase
        .selected_project()
        .and_then(|index| state.portfolio.projects.get(index))
    else {
        return;
    };

    let colors = state.theme.colors();
    let mut open = true;

    let window = egui::Window::new(&project.title)
        .id(egui::Id::new("project_window"))
        .open(&mut open)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let badge_color = color_mapping::project_kind_color(project.kind, colors);
                ui.label(RichText::new(project.kind.label()).strong().color(badge_color));
                if let Some(year) = &project.year {
                    ui.label(RichText::new(year).color(colors.text_muted));
                }
            });
            ui.add_space(6.0);
            ui.label(&project.description);

            if !project.technologies.is_empty() {
                ui.add_space(10.0);
                ui.label(RichText::new("Built with").small().color(colors.accent));
                ui.horizontal_wrapped(|ui| {
                    for tech in &project.technologies {
                        ui.label(RichText::new(tech).color(colors.text_strong));
                    }
                });
            }

            if project.link.is_some() || project.repository.is_some() {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if let Some(link) = &project.link {
                        ui.hyperlink_to("Visit live site", link);
                    }
                    if let Some(repository) = &project.repository {
                        ui.hyperlink_to("View source", repository);
                    }
                });
            }
        });

    if let Some(window) = window {
        state.layout.add_floating(window.response.rect);
    }
    if !open {
        state.showcase.close_project();
    }
}
