use eframe::egui;
use egui::RichText;
use folio::{Portfolio, ThemeColors};

use super::{card, centered_column, section_heading};

pub fn render(ui: &mut egui::Ui, portfolio: &Portfolio, colors: &ThemeColors) {
    centered_column(ui, 760.0, |ui| {
        section_heading(ui, "Background", "Education", colors);

        for entry in &portfolio.education {
            card(ui, colors, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&entry.program).size(18.0).strong().color(colors.text_strong));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(&entry.period).color(colors.text_muted));
                    });
                });
                ui.label(RichText::new(&entry.institution).color(colors.accent));

                if !entry.highlights.is_empty() {
                    ui.add_space(6.0);
                    for highlight in &entry.highlights {
                        ui.label(format!("• {}", highlight));
                    }
                }
            });
            ui.add_space(12.0);
        }
    });
}
