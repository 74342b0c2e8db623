//! Landing section: who the site belongs to.

use eframe::egui;
use egui::RichText;
use folio::{Portfolio, ThemeColors};

use super::SectionInteraction;

pub fn render(ui: &mut egui::Ui, portfolio: &Portfolio, colors: &ThemeColors) -> Option<SectionInteraction> {
    let profile = &portfolio.profile;
    let mut interaction = None;

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.25).max(24.0));

        ui.label(RichText::new("Hi, I'm").size(20.0).color(colors.text_muted));
        ui.label(RichText::new(&profile.name).size(56.0).strong().color(colors.text_strong));
        ui.label(RichText::new(&profile.headline).size(22.0).color(colors.accent));

        if !profile.location.is_empty() {
            ui.add_space(4.0);
            ui.label(RichText::new(format!("📍 {}", profile.location)).color(colors.text_muted));
        }

        ui.add_space(16.0);
        ui.set_max_width(640.0);
        ui.label(RichText::new(&profile.summary).size(16.0));
        ui.add_space(16.0);

        ui.horizontal_wrapped(|ui| {
            for link in &profile.links {
                ui.hyperlink_to(&link.label, &link.url);
            }
        });

        ui.add_space(24.0);
        if ui.button(RichText::new("💬 Ask me anything").size(16.0)).clicked() {
            interaction = Some(SectionInteraction::OpenChat);
        }

        ui.add_space(32.0);
        ui.label(RichText::new("Scroll, swipe, or press ↓ to explore").small().color(colors.text_muted));
    });

    interaction
}
