//! Four-stage booking flow: symptoms, schedule, payment, confirmation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::confirmation::{AppointmentId, ConfirmedAppointment, Destination, Fee};
use super::draft::{BookingDraft, Field, PaymentMethod, Stage};
use crate::backend::{BackendError, PaymentReceipt, PortalBackend};
use crate::notify::{Notification, NotificationSink};

/// Tickets are unique per process so a late result can never be applied to a
/// newer wizard.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Reasons the wizard refuses an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{} is incomplete: missing {}", .stage.name(), list(.missing))]
    IncompleteStage { stage: Stage, missing: Vec<Field> },

    #[error("Preferred date {date} is before today ({today})")]
    DateInPast { date: NaiveDate, today: NaiveDate },

    #[error("Payment must be submitted to continue")]
    SubmitRequired,

    #[error("Action not available on {0}")]
    WrongStage(Stage),

    #[error("Payment is already being processed")]
    PaymentInProgress,

    #[error("Payment result does not belong to the active submission")]
    StalePayment,

    #[error(transparent)]
    PaymentFailed(#[from] BackendError),
}

fn list(fields: &[Field]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

/// State of the simulated payment step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentState {
    #[default]
    Idle,
    Processing {
        ticket: u64,
    },
    Failed(String),
}

/// A charge the backend is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub ticket: u64,
    pub method: PaymentMethod,
    pub fee: Fee,
    pub payer: String,
}

/// Booking wizard state.
///
/// Owns the draft exclusively. The UI edits `draft` in place for the active
/// stage and drives transitions through [`next`](Self::next),
/// [`back`](Self::back), the submit pair, and [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct BookingWizard {
    /// Form being filled in.
    pub draft: BookingDraft,
    stage: Stage,
    started_on: NaiveDate,
    fee: Fee,
    location: String,
    payment: PaymentState,
    confirmation: Option<ConfirmedAppointment>,
}

impl BookingWizard {
    pub fn new(started_on: NaiveDate, fee: Fee, location: impl Into<String>) -> Self {
        Self {
            draft: BookingDraft::default(),
            stage: Stage::Symptoms,
            started_on,
            fee,
            location: location.into(),
            payment: PaymentState::Idle,
            confirmation: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn started_on(&self) -> NaiveDate {
        self.started_on
    }

    pub fn fee(&self) -> &Fee {
        &self.fee
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn payment_state(&self) -> &PaymentState {
        &self.payment
    }

    /// True while a payment is in flight; the submit control is disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self.payment, PaymentState::Processing { .. })
    }

    pub fn confirmation(&self) -> Option<&ConfirmedAppointment> {
        self.confirmation.as_ref()
    }

    /// Earliest selectable date: today, never before the flow started.
    pub fn min_date(&self, today: NaiveDate) -> NaiveDate {
        today.max(self.started_on)
    }

    /// Check that the current stage may be left.
    pub fn validate_stage(&self, stage: Stage, today: NaiveDate) -> Result<(), WizardError> {
        let missing = self.draft.missing_fields(stage);
        if !missing.is_empty() {
            return Err(WizardError::IncompleteStage { stage, missing });
        }

        if stage == Stage::Schedule
            && let Some(date) = self.draft.preferred_date
            && date < self.min_date(today)
        {
            return Err(WizardError::DateInPast { date, today });
        }

        Ok(())
    }

    /// Advance one stage if the current one is complete.
    ///
    /// A refused transition leaves both stage and draft untouched.
    pub fn next(&mut self, today: NaiveDate, sink: &mut impl NotificationSink) -> Result<Stage, WizardError> {
        match self.stage {
            Stage::Symptoms | Stage::Schedule => {}
            Stage::Payment => {
                self.validate_stage(Stage::Payment, today)?;
                return Err(WizardError::SubmitRequired);
            }
            Stage::Confirmation => return Err(WizardError::WrongStage(Stage::Confirmation)),
        }

        if let Err(e) = self.validate_stage(self.stage, today) {
            debug!("Refusing to leave {:?}: {}", self.stage, e);
            return Err(e);
        }

        let Some(next) = self.stage.next() else {
            return Err(WizardError::WrongStage(self.stage));
        };
        self.enter(next, sink);
        Ok(next)
    }

    /// Go back one stage. The draft is never modified.
    ///
    /// Leaving the payment stage abandons any in-flight payment; leaving the
    /// confirmation stage drops the confirmation record.
    pub fn back(&mut self, sink: &mut impl NotificationSink) -> Result<Stage, WizardError> {
        let Some(previous) = self.stage.previous() else {
            return Err(WizardError::WrongStage(self.stage));
        };

        if let PaymentState::Processing { ticket } = self.payment {
            info!("Abandoning pending payment (ticket {ticket})");
        }
        self.payment = PaymentState::Idle;
        self.confirmation = None;

        self.enter(previous, sink);
        Ok(previous)
    }

    /// Validate the payment stage and enter the busy state.
    ///
    /// The returned request must be handed to a [`PortalBackend`] and its
    /// result fed back through [`complete_submit`](Self::complete_submit).
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<PaymentRequest, WizardError> {
        if self.stage != Stage::Payment {
            return Err(WizardError::WrongStage(self.stage));
        }
        if self.is_busy() {
            return Err(WizardError::PaymentInProgress);
        }

        for stage in [Stage::Symptoms, Stage::Schedule, Stage::Payment] {
            self.validate_stage(stage, today)?;
        }

        let ticket = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.payment = PaymentState::Processing { ticket };
        info!("Submitting payment of {} (ticket {ticket})", self.fee);

        Ok(PaymentRequest {
            ticket,
            method: self.draft.payment_method,
            fee: self.fee.clone(),
            payer: self.draft.payer(),
        })
    }

    /// Apply the backend's answer to a submission.
    ///
    /// Results for a ticket that is no longer pending are ignored.
    pub fn complete_submit(
        &mut self,
        ticket: u64,
        result: Result<PaymentReceipt, BackendError>,
        sink: &mut impl NotificationSink,
    ) -> Result<&ConfirmedAppointment, WizardError> {
        if self.payment != (PaymentState::Processing { ticket }) {
            debug!("Ignoring stale payment result (ticket {ticket})");
            return Err(WizardError::StalePayment);
        }

        if let Err(e) = result {
            warn!("Payment failed: {e}");
            self.payment = PaymentState::Failed(e.to_string());
            sink.notify(Notification::destructive("Payment failed", e.to_string()));
            return Err(WizardError::PaymentFailed(e));
        }

        let id = AppointmentId::generate(&mut rand::thread_rng());
        let Some(confirmed) = ConfirmedAppointment::from_draft(&self.draft, id, &self.location, self.fee.clone())
        else {
            self.payment = PaymentState::Idle;
            return Err(WizardError::IncompleteStage {
                stage: Stage::Schedule,
                missing: self.draft.missing_fields(Stage::Schedule),
            });
        };

        info!("Appointment {} confirmed for {}", confirmed.id, confirmed.date_label());
        self.payment = PaymentState::Idle;
        self.stage = Stage::Confirmation;
        sink.notify(Notification::success(
            "Payment successful",
            "Your appointment has been scheduled.",
        ));

        let confirmed = self.confirmation.insert(confirmed);
        Ok(&*confirmed)
    }

    /// Submit the payment stage and wait for the backend.
    pub async fn submit(
        &mut self,
        backend: &dyn PortalBackend,
        today: NaiveDate,
        sink: &mut impl NotificationSink,
    ) -> Result<&ConfirmedAppointment, WizardError> {
        let request = self.begin_submit(today)?;
        let result = backend.process_payment(&request).await;
        self.complete_submit(request.ticket, result, sink)
    }

    /// Leave the flow from the confirmation stage.
    ///
    /// Hands the confirmed appointment to the caller, which should then drop
    /// the wizard and navigate to the returned destination.
    pub fn finish(&mut self) -> Result<(ConfirmedAppointment, Destination), WizardError> {
        if self.stage != Stage::Confirmation {
            return Err(WizardError::WrongStage(self.stage));
        }
        let confirmed = self
            .confirmation
            .take()
            .ok_or(WizardError::WrongStage(Stage::Confirmation))?;
        info!("Booking flow finished with {}", confirmed.id);
        Ok((confirmed, Destination::DashboardHome))
    }

    fn enter(&mut self, stage: Stage, sink: &mut impl NotificationSink) {
        debug!("Booking wizard: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
        sink.notify(Notification::info(stage.to_string(), stage.title()));
    }
}
