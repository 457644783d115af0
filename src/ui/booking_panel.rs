//! Booking wizard pages.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{ARROW_LEFT, ARROW_RIGHT, CARET_RIGHT, CHECK_CIRCLE, CREDIT_CARD, DEVICE_MOBILE};

use super::app::App;
use super::components::{back_button, card, colors, detail_row, panel_header, primary_button_enabled};
use crate::booking::{BookingWizard, PaymentMethod, PaymentState, Specialty, Stage, TimeSlot};
use crate::notify::{Notification, NotificationSink};

/// Button pressed on the current stage.
enum WizardAction {
    Next,
    Back,
    Pay,
    Finish,
}

/// Show the booking panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Book Appointment");

    let today = Local::now().date_naive();
    let Some(wizard) = app.wizard.as_mut() else {
        ui.label(RichText::new("No booking in progress").weak());
        return go_back;
    };

    show_progress(ui, wizard.stage());
    ui.add_space(20.0);

    ui.label(RichText::new(wizard.stage().title()).size(20.0).strong());
    ui.add_space(10.0);

    let action = card(ui, |ui| {
        ui.set_min_width(ui.available_width().min(640.0));
        match wizard.stage() {
            Stage::Symptoms => symptoms_stage(ui, wizard),
            Stage::Schedule => schedule_stage(ui, wizard, today),
            Stage::Payment => payment_stage(ui, wizard),
            Stage::Confirmation => confirmation_stage(ui, wizard),
        }
    });

    match action {
        Some(WizardAction::Next) => {
            if let Some(wizard) = app.wizard.as_mut()
                && let Err(e) = wizard.next(today, &mut app.toasts)
            {
                app.toasts
                    .notify(Notification::destructive("Please complete this step", e.to_string()));
            }
        }
        Some(WizardAction::Back) => {
            if let Some(wizard) = app.wizard.as_mut() {
                let _ = wizard.back(&mut app.toasts);
            }
        }
        Some(WizardAction::Pay) => app.submit_payment(),
        Some(WizardAction::Finish) => app.finish_booking(),
        None => {}
    }

    go_back
}

/// Numbered step indicator.
fn show_progress(ui: &mut Ui, current: Stage) {
    ui.horizontal(|ui| {
        for stage in Stage::ALL {
            let (fill, text) = if stage < current {
                (colors::SUCCESS, Color32::WHITE)
            } else if stage == current {
                (colors::PRIMARY, Color32::WHITE)
            } else {
                (ui.visuals().faint_bg_color, ui.visuals().weak_text_color())
            };

            egui::Frame::new()
                .fill(fill)
                .inner_margin(Margin::symmetric(10, 4))
                .corner_radius(CornerRadius::same(12))
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("{} {}", stage.number(), stage.name())).color(text));
                });

            if !stage.is_terminal() {
                ui.label(RichText::new(CARET_RIGHT).weak());
            }
        }
    });
    ui.add_space(5.0);
    ui.label(RichText::new(current.to_string()).small().weak());
}

fn nav_buttons(ui: &mut Ui, show_back: bool, next_label: &str) -> Option<WizardAction> {
    let mut action = None;
    ui.add_space(15.0);
    ui.horizontal(|ui| {
        if show_back && ui.button(format!("{ARROW_LEFT} Back")).clicked() {
            action = Some(WizardAction::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button_enabled(ui, true, next_label).clicked() {
                action = Some(WizardAction::Next);
            }
        });
    });
    action
}

fn symptoms_stage(ui: &mut Ui, wizard: &mut BookingWizard) -> Option<WizardAction> {
    let draft = &mut wizard.draft;

    ui.label("What symptoms are you experiencing? *");
    ui.add(
        egui::TextEdit::multiline(&mut draft.symptoms)
            .hint_text("Describe how you feel and for how long")
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );

    ui.add_space(10.0);
    ui.label("Which kind of doctor do you need? *");
    egui::ComboBox::from_id_salt("booking_specialty")
        .width(260.0)
        .selected_text(draft.specialty_needed.map(Specialty::label).unwrap_or("Select a specialty"))
        .show_ui(ui, |ui| {
            for specialty in Specialty::ALL {
                ui.selectable_value(&mut draft.specialty_needed, Some(specialty), specialty.label());
            }
        });

    nav_buttons(ui, false, &format!("Continue {ARROW_RIGHT}"))
}

fn schedule_stage(ui: &mut Ui, wizard: &mut BookingWizard, today: NaiveDate) -> Option<WizardAction> {
    let min_date = wizard.min_date(today);
    let draft = &mut wizard.draft;

    egui::Grid::new("booking_schedule_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Preferred date *");
            ui.horizontal(|ui| {
                let mut date = draft.preferred_date.unwrap_or(min_date);
                if ui
                    .add(DatePickerButton::new(&mut date).id_salt("booking_date"))
                    .changed()
                {
                    draft.preferred_date = Some(date);
                }
                match draft.preferred_date {
                    None => {
                        ui.label(RichText::new("Not selected").weak());
                    }
                    Some(date) if date < min_date => {
                        ui.colored_label(colors::ERROR, "Date is in the past");
                    }
                    Some(_) => {}
                }
            });
            ui.end_row();
        });

    ui.add_space(10.0);
    ui.label("Available time slots *");
    ui.add_space(5.0);

    egui::Grid::new("booking_slots_grid")
        .num_columns(4)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            for (idx, slot) in TimeSlot::all().enumerate() {
                let selected = draft.preferred_time == Some(slot);
                if ui.selectable_label(selected, slot.label()).clicked() {
                    draft.preferred_time = Some(slot);
                }
                if idx % 4 == 3 {
                    ui.end_row();
                }
            }
        });

    nav_buttons(ui, true, &format!("Continue to Payment {ARROW_RIGHT}"))
}

fn payment_stage(ui: &mut Ui, wizard: &mut BookingWizard) -> Option<WizardAction> {
    let busy = wizard.is_busy();
    let fee = wizard.fee().to_string();
    let failure = match wizard.payment_state() {
        PaymentState::Failed(reason) => Some(reason.clone()),
        _ => None,
    };
    let draft = &mut wizard.draft;

    // Summary
    ui.label(RichText::new("Appointment Summary").strong());
    ui.add_space(5.0);
    egui::Grid::new("booking_summary_grid")
        .num_columns(2)
        .spacing([20.0, 6.0])
        .show(ui, |ui| {
            if let Some(specialty) = draft.specialty_needed {
                detail_row(ui, "Specialty", specialty.summary_label());
                detail_row(ui, "Doctor", specialty.doctor());
            }
            if let Some(date) = draft.preferred_date {
                detail_row(ui, "Date", date.format("%Y-%m-%d").to_string());
            }
            if let Some(time) = draft.preferred_time {
                detail_row(ui, "Time", time.label());
            }
            detail_row(ui, "Consultation fee", RichText::new(&fee).strong());
        });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);

    ui.add_enabled_ui(!busy, |ui| {
        ui.label("Payment method *");
        ui.horizontal(|ui| {
            ui.radio_value(
                &mut draft.payment_method,
                PaymentMethod::MobileMoney,
                format!("{DEVICE_MOBILE} {}", PaymentMethod::MobileMoney.label()),
            );
            ui.radio_value(
                &mut draft.payment_method,
                PaymentMethod::CreditCard,
                format!("{CREDIT_CARD} {}", PaymentMethod::CreditCard.label()),
            );
        });
        ui.add_space(8.0);

        egui::Grid::new("booking_payment_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| match draft.payment_method {
                PaymentMethod::MobileMoney => {
                    ui.label("Mobile money number *");
                    ui.add(egui::TextEdit::singleline(&mut draft.phone_number).hint_text("+265 ..."));
                    ui.end_row();
                }
                PaymentMethod::CreditCard => {
                    ui.label("Card number *");
                    ui.add(egui::TextEdit::singleline(&mut draft.card_number).hint_text("1234 5678 9012 3456"));
                    ui.end_row();
                    ui.label("Expiry date *");
                    ui.add(egui::TextEdit::singleline(&mut draft.card_expiry).hint_text("MM/YY"));
                    ui.end_row();
                    ui.label("CVV *");
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.card_cvv)
                            .password(true)
                            .desired_width(60.0),
                    );
                    ui.end_row();
                }
            });
    });

    if let Some(reason) = failure {
        ui.add_space(8.0);
        ui.colored_label(colors::ERROR, format!("Payment failed: {reason}"));
    }

    let mut action = None;
    ui.add_space(15.0);
    ui.horizontal(|ui| {
        if ui.button(format!("{ARROW_LEFT} Back")).clicked() {
            action = Some(WizardAction::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if busy {
                "Processing...".to_string()
            } else {
                format!("Pay {fee}")
            };
            if primary_button_enabled(ui, !busy, &label).clicked() {
                action = Some(WizardAction::Pay);
            }
            if busy {
                ui.spinner();
            }
        });
    });
    action
}

fn confirmation_stage(ui: &mut Ui, wizard: &mut BookingWizard) -> Option<WizardAction> {
    let Some(confirmed) = wizard.confirmation() else {
        ui.label(RichText::new("No confirmation available").weak());
        return None;
    };

    ui.vertical_centered(|ui| {
        ui.label(RichText::new(CHECK_CIRCLE).size(48.0).color(colors::SUCCESS));
        ui.label(RichText::new("Your appointment has been booked").size(16.0));
    });
    ui.add_space(15.0);

    egui::Grid::new("booking_confirmation_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            detail_row(ui, "Appointment ID", RichText::new(confirmed.id.to_string()).strong());
            detail_row(ui, "Doctor", confirmed.doctor.as_str());
            detail_row(ui, "Specialty", confirmed.specialty.label());
            detail_row(ui, "Date", confirmed.date_label());
            detail_row(ui, "Time", confirmed.time.label());
            detail_row(ui, "Location", confirmed.location.as_str());
            detail_row(ui, "Amount paid", confirmed.fee.to_string());
            detail_row(ui, "Paid with", confirmed.payment_method.label());
        });

    ui.add_space(10.0);
    ui.label(RichText::new("Please arrive 15 minutes before your appointment time.").weak());

    let mut action = None;
    ui.add_space(15.0);
    ui.horizontal(|ui| {
        if primary_button_enabled(ui, true, "Go to Dashboard").clicked() {
            action = Some(WizardAction::Finish);
        }
    });
    action
}
