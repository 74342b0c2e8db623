use eframe::egui;
use egui::RichText;
use folio::{Portfolio, Skill, ThemeColors};

use super::{card, centered_column, section_heading};
use crate::presentation::color_mapping;
use crate::state::ShowcaseState;

const LABEL_WIDTH: f32 = 120.0;

pub fn render(ui: &mut egui::Ui, portfolio: &Portfolio, showcase: &mut ShowcaseState, colors: &ThemeColors) {
    centered_column(ui, 760.0, |ui| {
        section_heading(ui, "What I work with", "Skills", colors);

        if portfolio.skills.is_empty() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            for (index, group) in portfolio.skills.iter().enumerate() {
                if ui.selectable_label(showcase.skill_category() == index, &group.name).clicked() {
                    showcase.select_category(index);
                }
            }
        });
        ui.add_space(8.0);

        let category = showcase.skill_category().min(portfolio.skills.len() - 1);
        let group = &portfolio.skills[category];

        card(ui, colors, |ui| {
            for (index, skill) in group.skills.iter().enumerate() {
                let selected = showcase.selected_skill() == Some(index);
                ui.horizontal(|ui| {
                    let name = RichText::new(&skill.name);
                    let name = if selected { name.strong().color(colors.accent) } else { name };
                    let label = ui.add_sized([LABEL_WIDTH, 18.0], egui::Button::new(name).frame(false));
                    if label.clicked() {
                        showcase.toggle_skill(index);
                    }
                    let fraction = f32::from(skill.level.min(100)) / 100.0;
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .fill(color_mapping::skill_level_color(skill.level, colors))
                            .text(format!("{}%", skill.level)),
                    );
                });
            }
        });

        if let Some(skill) = showcase.selected_skill().and_then(|index| group.skills.get(index)) {
            ui.add_space(12.0);
            card(ui, colors, |ui| render_skill_detail(ui, skill, colors));
        }
    });
}

fn render_skill_detail(ui: &mut egui::Ui, skill: &Skill, colors: &ThemeColors) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&skill.name).size(18.0).strong().color(colors.text_strong));
        ui.label(
            RichText::new(skill.proficiency().label())
                .small()
                .strong()
                .color(color_mapping::skill_level_color(skill.level, colors)),
        );
    });
    if !skill.description.is_empty() {
        ui.add_space(4.0);
        ui.label(&skill.description);
    }
}
