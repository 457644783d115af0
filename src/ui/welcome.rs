//! Landing screen shown before sign-in.

use chrono::{Datelike, Local};
use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{FIRST_AID, SIGN_IN, USER_PLUS};

use super::app::{App, Screen};
use super::components::{colors, primary_button};

/// Show the welcome screen.
///
/// Returns the screen to switch to, if any.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);

        ui.label(RichText::new(FIRST_AID).size(64.0).color(colors::PRIMARY));
        ui.add_space(10.0);
        ui.label(RichText::new(&app.config.hospital.name).size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(&app.config.hospital.tagline).size(16.0).weak());

        ui.add_space(40.0);

        if primary_button(ui, SIGN_IN, "Login").clicked() {
            next = Some(Screen::Login);
        }
        ui.add_space(10.0);
        if ui
            .add(egui::Button::new(format!("{USER_PLUS} Create Account")).min_size(egui::vec2(120.0, 30.0)))
            .clicked()
        {
            next = Some(Screen::Signup);
        }

        ui.add_space(60.0);
        ui.label(
            RichText::new(format!(
                "© {} {}. All rights reserved.",
                Local::now().year(),
                app.config.hospital.name
            ))
            .small()
            .weak(),
        );
    });

    next
}
