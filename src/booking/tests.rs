//! Unit tests for the booking wizard.

use std::time::Duration;

use chrono::{Local, NaiveDate};

use super::*;
use crate::backend::{BackendError, Delays, Outcome, PaymentReceipt, SimulatedBackend};
use crate::notify::{Notification, Severity};

const LOCATION: &str = "Mwaiwathu Private Hospital, Nyambadwe, Old Chileka Road.";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn tomorrow() -> NaiveDate {
    today().succ_opt().unwrap()
}

fn wizard() -> BookingWizard {
    BookingWizard::new(today(), Fee::new(10_000, "MK"), LOCATION)
}

fn fill_symptoms(w: &mut BookingWizard) {
    w.draft.symptoms = "headache".to_string();
    w.draft.specialty_needed = Some(Specialty::General);
}

fn fill_schedule(w: &mut BookingWizard) {
    w.draft.preferred_date = Some(tomorrow());
    w.draft.preferred_time = TimeSlot::from_label("10:00 AM");
}

/// Wizard sitting on the payment stage with mobile money filled in.
fn wizard_at_payment() -> BookingWizard {
    let mut w = wizard();
    let mut sink = Vec::new();
    fill_symptoms(&mut w);
    w.next(today(), &mut sink).unwrap();
    fill_schedule(&mut w);
    w.next(today(), &mut sink).unwrap();
    w.draft.phone_number = "0991234567".to_string();
    w
}

fn receipt(ticket: u64) -> PaymentReceipt {
    PaymentReceipt {
        ticket,
        amount: Fee::new(10_000, "MK"),
        method: PaymentMethod::MobileMoney,
        paid_at: Local::now(),
    }
}

fn assert_apt_id(text: &str) {
    assert_eq!(text.len(), 8, "unexpected id {text}");
    assert!(text.starts_with("APT-"), "unexpected id {text}");
    assert!(text[4..].chars().all(|c| c.is_ascii_digit()), "unexpected id {text}");
}

#[test]
fn test_starts_on_symptoms_with_empty_draft() {
    let w = wizard();
    assert_eq!(w.stage(), Stage::Symptoms);
    assert_eq!(w.draft, BookingDraft::default());
    assert_eq!(w.draft.payment_method, PaymentMethod::MobileMoney);
    assert_eq!(w.payment_state(), &PaymentState::Idle);
    assert!(w.confirmation().is_none());
}

#[test]
fn test_next_refused_on_incomplete_symptoms() {
    let mut w = wizard();
    let mut sink = Vec::new();

    // Each required field missing in turn
    w.draft.symptoms = "headache".to_string();
    let before = w.draft.clone();
    let err = w.next(today(), &mut sink).unwrap_err();
    assert_eq!(
        err,
        WizardError::IncompleteStage {
            stage: Stage::Symptoms,
            missing: vec![Field::Specialty],
        }
    );
    assert_eq!(w.stage(), Stage::Symptoms);
    assert_eq!(w.draft, before);

    w.draft.symptoms.clear();
    w.draft.specialty_needed = Some(Specialty::Dermatology);
    let before = w.draft.clone();
    assert!(w.next(today(), &mut sink).is_err());
    assert_eq!(w.stage(), Stage::Symptoms);
    assert_eq!(w.draft, before);

    // Refusals emit no notification
    assert!(sink.is_empty());
}

#[test]
fn test_next_refused_on_incomplete_schedule() {
    let mut w = wizard();
    let mut sink = Vec::new();
    fill_symptoms(&mut w);
    w.next(today(), &mut sink).unwrap();

    w.draft.preferred_date = Some(tomorrow());
    let before = w.draft.clone();
    assert!(matches!(
        w.next(today(), &mut sink),
        Err(WizardError::IncompleteStage { stage: Stage::Schedule, .. })
    ));
    assert_eq!(w.stage(), Stage::Schedule);
    assert_eq!(w.draft, before);

    w.draft.preferred_date = None;
    w.draft.preferred_time = TimeSlot::from_label("2:00 PM");
    let before = w.draft.clone();
    assert!(w.next(today(), &mut sink).is_err());
    assert_eq!(w.stage(), Stage::Schedule);
    assert_eq!(w.draft, before);
}

#[test]
fn test_next_refused_on_incomplete_payment() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    w.draft.phone_number.clear();
    let before = w.draft.clone();

    let err = w.next(today(), &mut sink).unwrap_err();
    assert_eq!(
        err,
        WizardError::IncompleteStage {
            stage: Stage::Payment,
            missing: vec![Field::PhoneNumber],
        }
    );
    assert_eq!(w.stage(), Stage::Payment);
    assert_eq!(w.draft, before);
}

#[test]
fn test_next_on_complete_payment_requires_submit() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    assert_eq!(w.next(today(), &mut sink), Err(WizardError::SubmitRequired));
    assert_eq!(w.stage(), Stage::Payment);
}

#[test]
fn test_past_date_rejected_at_schedule() {
    let mut w = wizard();
    let mut sink = Vec::new();
    fill_symptoms(&mut w);
    w.next(today(), &mut sink).unwrap();

    let yesterday = today().pred_opt().unwrap();
    w.draft.preferred_date = Some(yesterday);
    w.draft.preferred_time = TimeSlot::from_label("9:00 AM");

    assert_eq!(
        w.next(today(), &mut sink),
        Err(WizardError::DateInPast {
            date: yesterday,
            today: today(),
        })
    );
    assert_eq!(w.stage(), Stage::Schedule);

    // Today itself is allowed
    w.draft.preferred_date = Some(today());
    assert_eq!(w.next(today(), &mut sink), Ok(Stage::Payment));
}

#[test]
fn test_date_checked_against_current_day_not_start() {
    let mut w = wizard();
    let mut sink = Vec::new();
    fill_symptoms(&mut w);
    w.next(today(), &mut sink).unwrap();

    // The day rolls over while the wizard is open
    w.draft.preferred_date = Some(today());
    w.draft.preferred_time = TimeSlot::from_label("9:00 AM");
    let later = today().succ_opt().unwrap();
    assert!(matches!(
        w.next(later, &mut sink),
        Err(WizardError::DateInPast { .. })
    ));
}

#[test]
fn test_back_preserves_fields() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    w.draft.payment_method = PaymentMethod::CreditCard;
    w.draft.card_number = "4111 1111 1111 1111".to_string();
    let snapshot = w.draft.clone();

    assert_eq!(w.back(&mut sink), Ok(Stage::Schedule));
    assert_eq!(w.draft, snapshot);
    assert_eq!(w.back(&mut sink), Ok(Stage::Symptoms));
    assert_eq!(w.draft, snapshot);
    assert!(w.back(&mut sink).is_err());
    assert_eq!(w.stage(), Stage::Symptoms);
    assert_eq!(w.draft, snapshot);
}

#[test]
fn test_back_from_confirmation() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    let request = w.begin_submit(today()).unwrap();
    w.complete_submit(request.ticket, Ok(receipt(request.ticket)), &mut sink)
        .unwrap();
    let snapshot = w.draft.clone();

    assert_eq!(w.back(&mut sink), Ok(Stage::Payment));
    assert_eq!(w.draft, snapshot);
    assert!(w.confirmation().is_none());
}

#[test]
fn test_transitions_emit_notifications() {
    let mut w = wizard();
    let mut sink: Vec<Notification> = Vec::new();
    fill_symptoms(&mut w);
    w.next(today(), &mut sink).unwrap();
    w.back(&mut sink).unwrap();

    assert_eq!(sink.len(), 2);
    assert_eq!(sink[0].title, "Step 2 of 4: Schedule");
    assert_eq!(sink[1].title, "Step 1 of 4: Symptoms");
    assert!(sink.iter().all(|n| n.severity == Severity::Info));
}

#[test]
fn test_submit_refused_without_phone() {
    let mut w = wizard_at_payment();
    w.draft.phone_number = "  ".to_string();

    let err = w.begin_submit(today()).unwrap_err();
    assert_eq!(
        err,
        WizardError::IncompleteStage {
            stage: Stage::Payment,
            missing: vec![Field::PhoneNumber],
        }
    );
    assert!(!w.is_busy());
    assert_eq!(w.stage(), Stage::Payment);
}

#[test]
fn test_submit_only_from_payment() {
    let mut w = wizard();
    fill_symptoms(&mut w);
    assert_eq!(w.begin_submit(today()), Err(WizardError::WrongStage(Stage::Symptoms)));
}

#[test]
fn test_switching_method_swaps_requirements() {
    let mut w = wizard_at_payment();
    let original = w.draft.required_fields(Stage::Payment);

    w.draft.payment_method = PaymentMethod::CreditCard;
    assert_eq!(
        w.draft.missing_fields(Stage::Payment),
        vec![Field::CardNumber, Field::CardExpiry, Field::CardCvv]
    );
    assert!(w.begin_submit(today()).is_err());

    w.draft.payment_method = PaymentMethod::MobileMoney;
    assert_eq!(w.draft.required_fields(Stage::Payment), original);
    assert!(w.draft.missing_fields(Stage::Payment).is_empty());
    assert!(w.begin_submit(today()).is_ok());
}

#[test]
fn test_card_payment_accepts_any_format() {
    let mut w = wizard_at_payment();
    w.draft.payment_method = PaymentMethod::CreditCard;
    w.draft.card_number = "not a number".to_string();
    w.draft.card_expiry = "whenever".to_string();
    w.draft.card_cvv = "x".to_string();

    let request = w.begin_submit(today()).unwrap();
    assert_eq!(request.method, PaymentMethod::CreditCard);
}

#[test]
fn test_busy_state_blocks_second_submit() {
    let mut w = wizard_at_payment();
    let request = w.begin_submit(today()).unwrap();

    assert!(w.is_busy());
    assert_eq!(w.payment_state(), &PaymentState::Processing { ticket: request.ticket });
    assert_eq!(w.begin_submit(today()), Err(WizardError::PaymentInProgress));
    assert_eq!(request.fee, Fee::new(10_000, "MK"));
    assert_eq!(request.payer, "0991234567");
}

#[test]
fn test_failed_payment_stays_on_payment() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    let request = w.begin_submit(today()).unwrap();

    let err = w
        .complete_submit(
            request.ticket,
            Err(BackendError::PaymentDeclined("insufficient funds".to_string())),
            &mut sink,
        )
        .unwrap_err();

    assert!(matches!(err, WizardError::PaymentFailed(_)));
    assert_eq!(w.stage(), Stage::Payment);
    assert!(!w.is_busy());
    assert!(matches!(w.payment_state(), PaymentState::Failed(_)));
    assert_eq!(sink.last().unwrap().severity, Severity::Destructive);

    // Retry succeeds
    let request = w.begin_submit(today()).unwrap();
    w.complete_submit(request.ticket, Ok(receipt(request.ticket)), &mut sink)
        .unwrap();
    assert_eq!(w.stage(), Stage::Confirmation);
}

#[test]
fn test_result_after_back_is_ignored() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    let request = w.begin_submit(today()).unwrap();

    w.back(&mut sink).unwrap();
    assert!(!w.is_busy());

    let late = w.complete_submit(request.ticket, Ok(receipt(request.ticket)), &mut sink);
    assert_eq!(late, Err(WizardError::StalePayment));
    assert_eq!(w.stage(), Stage::Schedule);
    assert!(w.confirmation().is_none());
}

#[test]
fn test_finish_returns_confirmation() {
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    assert_eq!(w.finish().unwrap_err(), WizardError::WrongStage(Stage::Payment));

    let request = w.begin_submit(today()).unwrap();
    let id = w
        .complete_submit(request.ticket, Ok(receipt(request.ticket)), &mut sink)
        .unwrap()
        .id;

    let (confirmed, destination) = w.finish().unwrap();
    assert_eq!(confirmed.id, id);
    assert_eq!(destination, Destination::DashboardHome);
    assert!(w.finish().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_submit_completes_after_delay() {
    let backend = SimulatedBackend::new(Delays::default(), Outcome::Succeed);
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();
    let start = tokio::time::Instant::now();

    let confirmed = w.submit(&backend, today(), &mut sink).await.unwrap().clone();

    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(w.stage(), Stage::Confirmation);
    assert_apt_id(&confirmed.id.to_string());
    assert_eq!(sink.last().unwrap().title, "Payment successful");
    assert_eq!(sink.last().unwrap().severity, Severity::Success);
}

#[tokio::test(start_paused = true)]
async fn test_submit_with_failing_backend() {
    let backend = SimulatedBackend::new(Delays::default(), Outcome::Fail("gateway down".to_string()));
    let mut w = wizard_at_payment();
    let mut sink = Vec::new();

    let err = w.submit(&backend, today(), &mut sink).await.unwrap_err();

    assert_eq!(
        err,
        WizardError::PaymentFailed(BackendError::PaymentDeclined("gateway down".to_string()))
    );
    assert_eq!(w.stage(), Stage::Payment);
    assert!(w.confirmation().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_booking() {
    let backend = SimulatedBackend::new(Delays::default(), Outcome::Succeed);
    let mut w = wizard();
    let mut sink = Vec::new();

    w.draft.symptoms = "headache".to_string();
    w.draft.specialty_needed = Some(Specialty::General);
    assert_eq!(w.next(today(), &mut sink), Ok(Stage::Schedule));

    w.draft.preferred_date = Some(tomorrow());
    w.draft.preferred_time = TimeSlot::from_label("10:00 AM");
    assert_eq!(w.next(today(), &mut sink), Ok(Stage::Payment));

    w.draft.payment_method = PaymentMethod::MobileMoney;
    w.draft.phone_number = "0991234567".to_string();
    w.submit(&backend, today(), &mut sink).await.unwrap();

    assert_eq!(w.stage(), Stage::Confirmation);
    let confirmed = w.confirmation().unwrap();
    assert_apt_id(&confirmed.id.to_string());
    assert_eq!(confirmed.date_label(), tomorrow().format("%Y-%m-%d").to_string());
    assert_eq!(confirmed.time.label(), "10:00 AM");
    assert_eq!(confirmed.doctor, "Dr. Sarah Johnson");
    assert_eq!(confirmed.location, LOCATION);
    assert_eq!(confirmed.fee.to_string(), "MK10000");
}
