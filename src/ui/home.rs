//! Dashboard home with greeting, summary cards, and activity log.

use chrono::Local;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CALENDAR_BLANK, CALENDAR_PLUS, FILE_TEXT, HEART};

use super::app::{App, LogLevel, Page};
use super::components::{card, colors, feature_card, primary_button};

/// Show the dashboard home.
///
/// Returns `Some(page)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Page> {
    let mut next_page = None;

    ui.add_space(20.0);

    // Greeting and primary action
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(format!("Welcome, {}", app.patient_name())).size(28.0).strong());
            ui.label(
                RichText::new(Local::now().format("%A, %B %-d, %Y").to_string())
                    .size(14.0)
                    .weak(),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button(ui, CALENDAR_PLUS, "Book Appointment").clicked() {
                next_page = Some(Page::BookAppointment);
            }
        });
    });

    ui.add_space(25.0);

    // Navigation cards row
    let available = ui.available_width();
    let num_cards = 3.0;
    let spacing = 30.0;
    let total_spacing = spacing * (num_cards - 1.0);
    let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 250.0);
    let card_size = egui::vec2(card_width, card_width * 0.6);
    let total_width = card_width * num_cards + total_spacing;
    let start_offset = ((available - total_width) / 2.0).max(0.0);

    ui.horizontal(|ui| {
        ui.add_space(start_offset);

        if feature_card(ui, "Appointments", "View and manage visits", CALENDAR_BLANK, card_size).clicked() {
            next_page = Some(Page::Appointments);
        }

        ui.add_space(spacing);

        if feature_card(ui, "Medical Records", "Labs, medications, allergies", FILE_TEXT, card_size).clicked() {
            next_page = Some(Page::Records);
        }

        ui.add_space(spacing);

        if feature_card(ui, "Health Tips", "Articles for healthy living", HEART, card_size).clicked() {
            next_page = Some(Page::HealthTips);
        }
    });

    ui.add_space(25.0);

    // Upcoming appointments
    card(ui, |ui| {
        ui.set_min_width(ui.available_width());
        section_title(ui, "Upcoming Appointments", || next_page = Some(Page::Appointments));
        ui.add_space(10.0);

        let upcoming = app.appointments.upcoming();
        if upcoming.is_empty() {
            ui.label(RichText::new("No upcoming appointments").weak());
        } else {
            for appt in upcoming.into_iter().take(3) {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&appt.doctor).strong());
                    ui.label(RichText::new(&appt.specialty).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{} {}", appt.date.format("%b %-d, %Y"), appt.time));
                    });
                });
                ui.add_space(4.0);
            }
        }
    });

    // Two-column layout: Records summary | Health tips
    let available_width = ui.available_width();
    let column_width = (available_width - 20.0) / 2.0;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(column_width);
            card(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                section_title(ui, "Medical Records", || next_page = Some(Page::Records));
                ui.add_space(10.0);

                egui::Grid::new("home_records_grid")
                    .num_columns(2)
                    .spacing([20.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Last lab result:");
                        match app.records.latest_lab_date() {
                            Some(date) => ui.label(date.format("%b %-d, %Y").to_string()),
                            None => ui.label(RichText::new("None").weak()),
                        };
                        ui.end_row();

                        ui.label("Active medications:");
                        ui.label(app.records.active_medications().count().to_string());
                        ui.end_row();

                        ui.label("Refills due:");
                        let due = app.records.medications_needing_refill();
                        let color = if due > 0 { colors::WARNING } else { colors::SUCCESS };
                        ui.colored_label(color, due.to_string());
                        ui.end_row();
                    });
            });
        });

        ui.add_space(20.0);

        ui.vertical(|ui| {
            ui.set_width(column_width);
            card(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                section_title(ui, "Health Tips", || next_page = Some(Page::HealthTips));
                ui.add_space(10.0);

                for tip in app.tips.all().iter().take(2) {
                    ui.label(RichText::new(&tip.title).strong());
                    ui.label(RichText::new(&tip.excerpt).weak());
                    ui.add_space(6.0);
                }
            });
        });
    });

    // Recent activity
    card(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Recent Activity").strong());
        ui.add_space(10.0);

        ScrollArea::vertical()
            .id_salt("home_activity")
            .max_height(150.0)
            .show(ui, |ui| {
                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                } else {
                    for entry in app.log_messages.iter().rev().take(10) {
                        let color = match entry.level {
                            LogLevel::Info => Color32::GRAY,
                            LogLevel::Success => colors::SUCCESS,
                            LogLevel::Warning => colors::WARNING,
                            LogLevel::Error => colors::ERROR,
                        };

                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                    .small()
                                    .color(Color32::DARK_GRAY),
                            );
                            ui.label(RichText::new(&entry.message).color(color));
                        });
                    }
                }
            });

        if !app.log_messages.is_empty() && ui.small_button("Clear").clicked() {
            app.log_messages.clear();
        }
    });

    next_page
}

/// Card title with a "View all" link on the right.
fn section_title(ui: &mut Ui, title: &str, on_view_all: impl FnOnce()) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.link("View all").clicked() {
                on_view_all();
            }
        });
    });
}
