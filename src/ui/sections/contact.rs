//! Contact section: the mail form.

use eframe::egui;
use egui::RichText;
use folio::{Portfolio, ThemeColors};

use super::{card, centered_column, section_heading, SectionInteraction};
use crate::state::ContactState;

pub fn render(
    ui: &mut egui::Ui,
    contact: &mut ContactState,
    portfolio: &Portfolio,
    colors: &ThemeColors,
) -> Option<SectionInteraction> {
    let mut interaction = None;

    centered_column(ui, 640.0, |ui| {
        section_heading(ui, "Say hello", "Contact", colors);

        if !portfolio.profile.email.is_empty() {
            ui.horizontal(|ui| {
                ui.label("Or write directly to");
                ui.hyperlink_to(&portfolio.profile.email, format!("mailto:{}", portfolio.profile.email));
            });
            ui.add_space(12.0);
        }

        let sending = contact.is_sending();

        card(ui, colors, |ui| {
            if let Some(form) = contact.form_mut() {
                ui.label("Full name");
                ui.add(egui::TextEdit::singleline(&mut form.fullname).desired_width(f32::INFINITY));
                ui.add_space(8.0);

                ui.label("Email");
                ui.add(egui::TextEdit::singleline(&mut form.email).desired_width(f32::INFINITY));
                ui.add_space(8.0);

                ui.label("Message");
                ui.add(
                    egui::TextEdit::multiline(&mut form.message)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );
            } else {
                // Read-only copy while the relay call is in flight
                let form = contact.form();
                ui.label(RichText::new(&form.fullname).strong());
                ui.label(RichText::new(&form.email).color(colors.text_muted));
                ui.label(&form.message);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let send = ui.add_enabled(!sending, egui::Button::new("✉ Send message"));
                if send.clicked() {
                    interaction = Some(SectionInteraction::SubmitContact);
                }
                if sending {
                    ui.spinner();
                    ui.label(RichText::new("Sending...").color(colors.text_muted));
                }
            });
        });
    });

    interaction
}
