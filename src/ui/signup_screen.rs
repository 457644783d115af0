//! Account creation form with collapsible sections.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, RichText, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{CARET_DOWN, CARET_RIGHT, EYE, EYE_SLASH, PLUS, TRASH, USER_PLUS};

use super::app::{App, Screen};
use super::components::{card, primary_button_enabled};
use crate::account::{
    BloodType, CHRONIC_ILLNESS_LIMIT, Credentials, Gender, MaritalStatus, MedicalHistory, NextOfKin, PersonalDetails,
    SignupSection,
};
use crate::models::AllergySeverity;

/// Show the signup screen.
///
/// Returns the screen to switch to, if any. A successful signup switches to
/// the login screen from the async result handler instead.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Screen> {
    let mut next = None;

    egui::ScrollArea::vertical().id_salt("signup_scroll").show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new("Create Account").size(28.0).strong());
            ui.label(RichText::new(format!("Register as a patient at {}", app.config.hospital.name)).weak());
            ui.add_space(20.0);
        });

        let pending = app.signup_pending;
        ui.add_enabled_ui(!pending, |ui| {
            for section in SignupSection::ALL {
                let open = app.signup_form.is_expanded(section);
                let caret = if open { CARET_DOWN } else { CARET_RIGHT };
                let header = RichText::new(format!("{caret} {}", section.title())).size(16.0).strong();
                if ui.selectable_label(open, header).clicked() {
                    app.signup_form.toggle(section);
                }

                if open {
                    card(ui, |ui| match section {
                        SignupSection::Personal => {
                            personal_section(ui, &mut app.signup_form.personal);
                            ui.add_space(15.0);
                            kin_section(ui, &mut app.signup_form.kin);
                        }
                        SignupSection::Medical => medical_section(ui, &mut app.signup_form.medical),
                        SignupSection::Credentials => credentials_section(ui, &mut app.signup_form.credentials),
                    });
                }
                ui.add_space(8.0);
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let label = if pending {
                "Creating account...".to_string()
            } else {
                format!("{USER_PLUS} Create Account")
            };
            if primary_button_enabled(ui, !pending, &label).clicked() {
                app.submit_signup();
            }
            if pending {
                ui.spinner();
            }
        });

        ui.add_space(15.0);
        ui.horizontal(|ui| {
            ui.label("Already have an account?");
            if ui.link("Log in").clicked() {
                next = Some(Screen::Login);
            }
        });
        if ui.link("Back to home").clicked() {
            next = Some(Screen::Welcome);
        }
        ui.add_space(30.0);
    });

    next
}

fn text_row(ui: &mut Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(hint).desired_width(260.0));
    ui.end_row();
}

/// ComboBox over an optional choice.
fn choice_row<T: Copy + PartialEq>(
    ui: &mut Ui,
    id: &str,
    label: &str,
    value: &mut Option<T>,
    options: &[T],
    name: impl Fn(T) -> &'static str,
) {
    ui.label(label);
    let selected = value.map(&name).unwrap_or("Select...");
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .width(260.0)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, Some(*option), name(*option));
            }
        });
    ui.end_row();
}

fn personal_section(ui: &mut Ui, p: &mut PersonalDetails) {
    ui.label(RichText::new("Personal Information").strong());
    ui.add_space(8.0);

    egui::Grid::new("signup_personal_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            text_row(ui, "First name *", &mut p.first_name, "John");
            text_row(ui, "Last name *", &mut p.last_name, "Doe");

            ui.label("Date of birth *");
            ui.horizontal(|ui| {
                let mut date = p.date_of_birth.unwrap_or_else(default_birth_date);
                let response = ui.add(DatePickerButton::new(&mut date).id_salt("signup_dob"));
                if response.changed() {
                    p.date_of_birth = Some(date);
                }
                if p.date_of_birth.is_none() {
                    ui.label(RichText::new("Not set").weak());
                }
            });
            ui.end_row();

            choice_row(ui, "signup_gender", "Gender *", &mut p.gender, &Gender::ALL, Gender::label);
            choice_row(
                ui,
                "signup_marital",
                "Marital status *",
                &mut p.marital_status,
                &MaritalStatus::ALL,
                MaritalStatus::label,
            );
            text_row(ui, "Occupation *", &mut p.occupation, "");
            text_row(ui, "Nationality *", &mut p.nationality, "");
            text_row(ui, "Phone number *", &mut p.phone_number, "+265 ...");
            text_row(ui, "Postal address", &mut p.postal_address, "Optional");
            text_row(ui, "Email *", &mut p.email, "you@example.com");
        });
}

fn kin_section(ui: &mut Ui, k: &mut NextOfKin) {
    ui.label(RichText::new("Next of Kin").strong());
    ui.add_space(8.0);

    egui::Grid::new("signup_kin_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            text_row(ui, "Full name *", &mut k.name, "");
            text_row(ui, "Relationship *", &mut k.relationship, "e.g. Spouse");
            text_row(ui, "Email", &mut k.email, "Optional");
            text_row(ui, "Phone number *", &mut k.phone_number, "");
            text_row(ui, "Postal address", &mut k.postal_address, "Optional");
        });
}

fn medical_section(ui: &mut Ui, m: &mut MedicalHistory) {
    egui::Grid::new("signup_medical_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            choice_row(ui, "signup_blood", "Blood type", &mut m.blood_type, &BloodType::ALL, BloodType::label);
        });

    ui.add_space(10.0);
    ui.label("Chronic illness");
    let mut note = m.chronic_illness().to_string();
    let response = ui.add(
        egui::TextEdit::multiline(&mut note)
            .char_limit(CHRONIC_ILLNESS_LIMIT)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        m.set_chronic_illness(&note);
    }
    ui.label(RichText::new(m.chronic_illness_counter()).small().weak());

    // Medications
    ui.add_space(12.0);
    ui.label(RichText::new("Current medications").strong());
    let mut remove = None;
    let removable = m.medications.can_remove();
    for (idx, med) in m.medications.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut med.pill_name).hint_text("Pill name").desired_width(200.0));
            ui.add(egui::TextEdit::singleline(&mut med.dosage).hint_text("Dosage").desired_width(140.0));
            if removable && ui.small_button(TRASH).on_hover_text("Remove").clicked() {
                remove = Some(idx);
            }
        });
    }
    if let Some(idx) = remove {
        let _ = m.medications.remove(idx);
    }
    if ui.button(format!("{PLUS} Add medication")).clicked() {
        m.medications.add();
    }

    // Allergies
    ui.add_space(12.0);
    ui.label(RichText::new("Allergies").strong());
    let mut remove = None;
    let removable = m.allergies.can_remove();
    for (idx, allergy) in m.allergies.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut allergy.name).hint_text("Allergen").desired_width(160.0));
            ui.add(
                egui::TextEdit::singleline(&mut allergy.reaction_type)
                    .hint_text("Reaction")
                    .desired_width(140.0),
            );
            let selected = allergy.severity.map(AllergySeverity::label).unwrap_or("Severity");
            egui::ComboBox::from_id_salt(("signup_allergy_severity", idx))
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for severity in AllergySeverity::ALL {
                        ui.selectable_value(&mut allergy.severity, Some(severity), severity.label());
                    }
                });
            if removable && ui.small_button(TRASH).on_hover_text("Remove").clicked() {
                remove = Some(idx);
            }
        });
    }
    if let Some(idx) = remove {
        let _ = m.allergies.remove(idx);
    }
    if ui.button(format!("{PLUS} Add allergy")).clicked() {
        m.allergies.add();
    }

    // Family history
    ui.add_space(12.0);
    ui.label(RichText::new("Family history").strong());
    let mut remove = None;
    let removable = m.family_history.can_remove();
    for (idx, entry) in m.family_history.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut entry.relation).hint_text("Relation").desired_width(140.0));
            ui.add(egui::TextEdit::singleline(&mut entry.condition).hint_text("Condition").desired_width(200.0));
            if removable && ui.small_button(TRASH).on_hover_text("Remove").clicked() {
                remove = Some(idx);
            }
        });
    }
    if let Some(idx) = remove {
        let _ = m.family_history.remove(idx);
    }
    if ui.button(format!("{PLUS} Add family history")).clicked() {
        m.family_history.add();
    }

    ui.add_space(12.0);
    ui.label("Additional information");
    ui.add(
        egui::TextEdit::multiline(&mut m.additional_info)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
}

fn credentials_section(ui: &mut Ui, c: &mut Credentials) {
    egui::Grid::new("signup_credentials_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            text_row(ui, "Username *", &mut c.username, "Choose a username");

            ui.label("Password *");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut c.password)
                        .password(!c.show_password)
                        .desired_width(230.0),
                );
                if ui.small_button(if c.show_password { EYE_SLASH } else { EYE }).clicked() {
                    c.show_password = !c.show_password;
                }
            });
            ui.end_row();

            ui.label("Confirm password *");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut c.confirm_password)
                        .password(!c.show_confirm_password)
                        .desired_width(230.0),
                );
                if ui
                    .small_button(if c.show_confirm_password { EYE_SLASH } else { EYE })
                    .clicked()
                {
                    c.show_confirm_password = !c.show_confirm_password;
                }
            });
            ui.end_row();
        });
}

/// Initial date shown by the birth date picker before one is chosen.
fn default_birth_date() -> NaiveDate {
    let today = Local::now().date_naive();
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(today)
}
