//! Login form.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{EYE, EYE_SLASH, SIGN_IN};

use super::app::{App, Screen};
use super::components::{card, primary_button_enabled};

/// Show the login screen.
///
/// Navigation to the portal happens once the backend accepts the credentials,
/// so this only returns a screen for the back and signup links.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Welcome Back").size(28.0).strong());
        ui.label(RichText::new("Sign in to access your patient portal").weak());
        ui.add_space(20.0);

        ui.set_max_width(380.0);
        card(ui, |ui| {
            let pending = app.login_pending;

            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Username:");
                    ui.add_enabled(
                        !pending,
                        egui::TextEdit::singleline(&mut app.login_form.username)
                            .hint_text("Enter your username")
                            .desired_width(220.0),
                    );
                    ui.end_row();

                    ui.label("Password:");
                    ui.horizontal(|ui| {
                        let response = ui.add_enabled(
                            !pending,
                            egui::TextEdit::singleline(&mut app.login_form.password)
                                .password(!app.login_form.show_password)
                                .hint_text("Enter your password")
                                .desired_width(190.0),
                        );
                        let icon = if app.login_form.show_password { EYE_SLASH } else { EYE };
                        if ui.small_button(icon).clicked() {
                            app.login_form.show_password = !app.login_form.show_password;
                        }
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            app.submit_login();
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(10.0);
            ui.checkbox(&mut app.login_form.remember_me, "Remember me");
            ui.add_space(15.0);

            ui.horizontal(|ui| {
                let label = if app.login_pending {
                    "Logging in...".to_string()
                } else {
                    format!("{SIGN_IN} Login")
                };
                if primary_button_enabled(ui, !app.login_pending, &label).clicked() {
                    app.submit_login();
                }
                if app.login_pending {
                    ui.spinner();
                }
            });
        });

        ui.add_space(15.0);
        ui.horizontal(|ui| {
            ui.label("Don't have an account?");
            if ui.link("Create one").clicked() {
                next = Some(Screen::Signup);
            }
        });
        ui.add_space(5.0);
        if ui.link("Back to home").clicked() {
            next = Some(Screen::Welcome);
        }

        ui.add_space(20.0);
        ui.label(
            RichText::new(format!(
                "Demo account: {} / {}",
                app.config.auth.demo_username, app.config.auth.demo_password
            ))
            .small()
            .weak(),
        );
    });

    next
}
