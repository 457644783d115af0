//! Appointment list with search, status filter, and tabs.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CALENDAR_PLUS, CLOCK_COUNTER_CLOCKWISE, X_CIRCLE};

use super::app::{App, Page};
use super::components::{back_button, badge, colors, panel_header, primary_button, search_box};
use crate::models::{AppointmentStatus, AppointmentTab, StatusFilter};

enum RowAction {
    Reschedule(u32),
    Cancel(u32),
}

/// Show the appointments panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "My Appointments");

    // Toolbar row 1: Booking
    ui.horizontal(|ui| {
        if primary_button(ui, CALENDAR_PLUS, "Book Appointment").clicked() {
            app.navigate(Page::BookAppointment);
        }
    });

    ui.add_space(10.0);

    // Toolbar row 2: Search and filter
    ui.horizontal(|ui| {
        search_box(ui, &mut app.appointment_search, "Doctor, specialty or reason...");

        ui.add_space(20.0);

        ui.label("Status:");
        egui::ComboBox::from_id_salt("appointment_status_filter")
            .width(140.0)
            .selected_text(app.appointment_status.label())
            .show_ui(ui, |ui| {
                for filter in StatusFilter::ALL {
                    ui.selectable_value(&mut app.appointment_status, filter, filter.label());
                }
            });

        if !app.appointment_search.is_empty() || app.appointment_status != StatusFilter::All {
            ui.add_space(10.0);
            if ui.button("Clear").clicked() {
                app.appointment_search.clear();
                app.appointment_status = StatusFilter::All;
            }
        }
    });

    ui.add_space(10.0);

    // Tabs
    ui.horizontal(|ui| {
        for tab in AppointmentTab::ALL {
            if ui
                .selectable_label(app.appointment_tab == tab, RichText::new(tab.label()).size(15.0))
                .clicked()
            {
                app.appointment_tab = tab;
            }
        }
    });

    ui.add_space(15.0);

    if let Some(action) = show_table(app, ui) {
        let result = match action {
            RowAction::Reschedule(id) => app.appointments.request_reschedule(id, &mut app.toasts),
            RowAction::Cancel(id) => app.appointments.cancel(id, &mut app.toasts),
        };
        match result {
            Ok(()) => app.log_info("Appointment updated"),
            Err(e) => {
                app.log_error(e.to_string());
                app.error_message = Some(e.to_string());
            }
        }
    }

    go_back
}

fn show_table(app: &App, ui: &mut Ui) -> Option<RowAction> {
    let rows = app
        .appointments
        .filtered(&app.appointment_search, app.appointment_status, app.appointment_tab);

    if rows.is_empty() {
        ui.add_space(20.0);
        ui.label(RichText::new("No appointments found").weak());
        return None;
    }

    let mut action = None;

    egui::Grid::new("appointments_grid")
        .num_columns(6)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for header in ["Doctor", "Specialty", "Date & Time", "Reason", "Status", "Actions"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for appt in rows {
                ui.vertical(|ui| {
                    ui.label(&appt.doctor);
                    if let Some(reference) = appt.reference {
                        ui.label(RichText::new(reference.to_string()).small().weak());
                    }
                });
                ui.label(&appt.specialty);
                ui.label(format!("{} {}", appt.date.format("%b %-d, %Y"), appt.time));
                ui.label(&appt.reason);

                let color = match appt.status {
                    AppointmentStatus::Upcoming => colors::PRIMARY,
                    AppointmentStatus::Completed => colors::SUCCESS,
                    AppointmentStatus::Cancelled => colors::ERROR,
                };
                badge(ui, appt.status.label(), color);

                ui.horizontal(|ui| {
                    if appt.status == AppointmentStatus::Upcoming {
                        if ui
                            .small_button(format!("{CLOCK_COUNTER_CLOCKWISE} Reschedule"))
                            .clicked()
                        {
                            action = Some(RowAction::Reschedule(appt.id));
                        }
                        if ui
                            .small_button(RichText::new(format!("{X_CIRCLE} Cancel")).color(colors::ERROR))
                            .clicked()
                        {
                            action = Some(RowAction::Cancel(appt.id));
                        }
                    } else {
                        ui.label(RichText::new("-").weak());
                    }
                });
                ui.end_row();
            }
        });

    action
}
