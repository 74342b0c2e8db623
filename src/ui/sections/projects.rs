use eframe::egui;
use egui::RichText;
use folio::{Portfolio, Project, ThemeColors};

use super::{card, centered_column, section_heading};
use crate::presentation::color_mapping;
use crate::state::ShowcaseState;

pub fn render(ui: &mut egui::Ui, portfolio: &Portfolio, showcase: &mut ShowcaseState, colors: &ThemeColors) {
    centered_column(ui, 820.0, |ui| {
        section_heading(ui, "Selected work", "Projects", colors);

        render_kind_tabs(ui, portfolio, showcase);
        ui.add_space(6.0);
        render_technology_filter(ui, portfolio, showcase, colors);
        ui.add_space(12.0);

        let mut opened = None;
        let mut shown = 0;
        for (index, project) in portfolio.filtered_projects(&showcase.project_filter) {
            let details = card(ui, colors, |ui| render_project(ui, project, colors));
            if details {
                opened = Some(index);
            }
            ui.add_space(12.0);
            shown += 1;
        }

        if shown == 0 {
            ui.label(RichText::new("No projects match these filters.").color(colors.text_muted));
        }

        if let Some(index) = opened {
            showcase.open_project(index);
        }
    });
}

fn render_kind_tabs(ui: &mut egui::Ui, portfolio: &Portfolio, showcase: &mut ShowcaseState) {
    let current = showcase.project_filter.kind;
    ui.horizontal_wrapped(|ui| {
        if ui.selectable_label(current.is_none(), "All").clicked() {
            showcase.set_kind(None);
        }
        for kind in portfolio.project_kinds() {
            if ui.selectable_label(current == Some(kind), kind.label()).clicked() {
                showcase.set_kind(Some(kind));
            }
        }
    });
}

fn render_technology_filter(ui: &mut egui::Ui, portfolio: &Portfolio, showcase: &mut ShowcaseState, colors: &ThemeColors) {
    let selected: Vec<String> = showcase.project_filter.technologies().map(str::to_string).collect();

    ui.horizontal_wrapped(|ui| {
        ui.menu_button("Filter by tech", |ui| {
            for tech in portfolio.technologies() {
                let mut checked = showcase.project_filter.has_technology(tech);
                if ui.checkbox(&mut checked, tech).changed() {
                    showcase.toggle_technology(tech);
                }
            }
        });

        for tech in &selected {
            let chip = RichText::new(format!("{tech} ×")).small().color(colors.accent);
            if ui.small_button(chip).on_hover_text("Remove filter").clicked() {
                showcase.toggle_technology(tech);
            }
        }

        if !selected.is_empty() && ui.small_button("Clear all").clicked() {
            showcase.clear_technologies();
        }
    });
}

/// Draws one project card. Returns true when "Details" was clicked.
fn render_project(ui: &mut egui::Ui, project: &Project, colors: &ThemeColors) -> bool {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&project.title).size(18.0).strong().color(colors.text_strong));
        let badge_color = color_mapping::project_kind_color(project.kind, colors);
        ui.label(RichText::new(project.kind.label()).small().strong().color(badge_color));

        if let Some(year) = &project.year {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(year).color(colors.text_muted));
            });
        }
    });

    ui.add_space(4.0);
    ui.label(&project.description);

    if !project.technologies.is_empty() {
        ui.add_space(6.0);
        ui.label(
            RichText::new(project.technologies.join(" · "))
                .small()
                .color(colors.text_muted),
        );
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let details = ui.button("Details").clicked();
        if let Some(link) = &project.link {
            ui.hyperlink_to("Live", link);
        }
        if let Some(repository) = &project.repository {
            ui.hyperlink_to("Source", repository);
        }
        details
    })
    .inner
}
