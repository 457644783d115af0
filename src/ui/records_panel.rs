//! Medical records with per-section tabs and Excel download.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{DOWNLOAD_SIMPLE, WARNING};

use super::app::App;
use super::components::{back_button, badge, card, colors, panel_header, primary_button};
use crate::models::{AllergySeverity, LabStatus, MedicalRecords, RecordSection};

/// Show the records panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Medical Records");

    // Toolbar: tabs and download
    ui.horizontal(|ui| {
        for section in RecordSection::ALL {
            if ui
                .selectable_label(app.record_section == section, RichText::new(section.label()).size(15.0))
                .clicked()
            {
                app.record_section = section;
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button(ui, DOWNLOAD_SIMPLE, "Download").clicked() {
                app.export_records(app.record_section);
            }
        });
    });

    ui.add_space(15.0);

    let records = &app.records;
    match app.record_section {
        RecordSection::Overview => show_overview(ui, records),
        RecordSection::LabResults => show_lab_results(ui, records),
        RecordSection::Medications => show_medications(ui, records),
        RecordSection::Allergies => show_allergies(ui, records),
        RecordSection::Immunizations => show_immunizations(ui, records),
    }

    go_back
}

fn show_overview(ui: &mut Ui, records: &MedicalRecords) {
    card(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Summary").strong());
        ui.add_space(10.0);

        egui::Grid::new("records_overview_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Lab results:");
                ui.label(records.lab_results.len().to_string());
                ui.end_row();

                ui.label("Last lab result:");
                match records.latest_lab_date() {
                    Some(date) => ui.label(date.format("%Y-%m-%d").to_string()),
                    None => ui.label(RichText::new("None").weak()),
                };
                ui.end_row();

                ui.label("Active medications:");
                ui.label(records.active_medications().count().to_string());
                ui.end_row();

                ui.label("Known allergies:");
                ui.label(records.allergies.len().to_string());
                ui.end_row();

                ui.label("Immunizations:");
                ui.label(records.immunizations.len().to_string());
                ui.end_row();
            });
    });

    let due = records.medications_needing_refill();
    if due > 0 {
        card(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.colored_label(
                colors::WARNING,
                format!("{WARNING} {due} medication(s) need a refill soon"),
            );
            for med in records.active_medications().filter(|m| m.needs_refill()) {
                ui.label(format!("{} {} ({} refills left)", med.name, med.dosage, med.refills_remaining));
            }
        });
    }
}

fn show_lab_results(ui: &mut Ui, records: &MedicalRecords) {
    if records.lab_results.is_empty() {
        ui.label(RichText::new("No lab results").weak());
        return;
    }

    egui::Grid::new("records_lab_grid")
        .num_columns(4)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for header in ["Test", "Date", "Doctor", "Status"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for result in &records.lab_results {
                ui.label(&result.name);
                ui.label(result.date.format("%Y-%m-%d").to_string());
                ui.label(&result.doctor);
                let color = match result.status {
                    LabStatus::Normal => colors::SUCCESS,
                    LabStatus::Abnormal => colors::ERROR,
                };
                badge(ui, result.status.label(), color);
                ui.end_row();
            }
        });
}

fn show_medications(ui: &mut Ui, records: &MedicalRecords) {
    ui.label(RichText::new("Current Medications").strong());
    ui.add_space(5.0);

    let active: Vec<_> = records.active_medications().collect();
    if active.is_empty() {
        ui.label(RichText::new("No active medications").weak());
    }
    for med in active {
        card(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} {}", med.name, med.dosage)).strong());
                if med.needs_refill() {
                    badge(ui, "Refill due", colors::WARNING);
                }
            });
            ui.label(&med.frequency);
            ui.label(
                RichText::new(format!(
                    "Prescribed by {} on {} \u{00b7} {} refills remaining",
                    med.prescribed_by,
                    med.start_date.format("%Y-%m-%d"),
                    med.refills_remaining
                ))
                .weak(),
            );
        });
    }

    ui.add_space(15.0);
    ui.label(RichText::new("Past Medications").strong());
    ui.add_space(5.0);

    let mut any_past = false;
    for med in records.past_medications() {
        any_past = true;
        ui.label(format!(
            "{} {} \u{00b7} {} (from {})",
            med.name,
            med.dosage,
            med.prescribed_by,
            med.start_date.format("%Y-%m-%d")
        ));
    }
    if !any_past {
        ui.label(RichText::new("No past medications").weak());
    }
}

fn show_allergies(ui: &mut Ui, records: &MedicalRecords) {
    if records.allergies.is_empty() {
        ui.label(RichText::new("No known allergies").weak());
        return;
    }

    egui::Grid::new("records_allergy_grid")
        .num_columns(3)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for header in ["Allergen", "Reaction", "Severity"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for allergy in &records.allergies {
                ui.label(&allergy.name);
                ui.label(&allergy.reaction);
                let color = match allergy.severity {
                    AllergySeverity::Mild => colors::NEUTRAL,
                    AllergySeverity::Moderate => colors::WARNING,
                    AllergySeverity::Severe => colors::ERROR,
                };
                badge(ui, allergy.severity.label(), color);
                ui.end_row();
            }
        });
}

fn show_immunizations(ui: &mut Ui, records: &MedicalRecords) {
    if records.immunizations.is_empty() {
        ui.label(RichText::new("No immunizations on record").weak());
        return;
    }

    egui::Grid::new("records_immunization_grid")
        .num_columns(3)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for header in ["Vaccine", "Date", "Provider"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for shot in &records.immunizations {
                ui.label(&shot.name);
                ui.label(shot.date.format("%Y-%m-%d").to_string());
                ui.label(&shot.provider);
                ui.end_row();
            }
        });
}
