//! Appointment booking flow.

pub mod confirmation;
pub mod draft;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use confirmation::{AppointmentId, ConfirmedAppointment, Destination, Fee};
pub use draft::{BookingDraft, Field, PaymentMethod, Specialty, Stage, TimeSlot};
pub use wizard::{BookingWizard, PaymentRequest, PaymentState, WizardError};
