//! Records produced once a booking has been paid for.

use std::fmt;

use chrono::NaiveDate;
use rand::Rng;

use super::draft::{BookingDraft, PaymentMethod, Specialty, TimeSlot};

/// The canonical appointment fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub amount: u32,
    pub currency: String,
}

impl Fee {
    pub fn new(amount: u32, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.amount)
    }
}

/// Appointment identifier, rendered as `APT-` plus four zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppointmentId(u16);

impl AppointmentId {
    pub const MAX: u16 = 9999;

    pub fn new(number: u16) -> Option<Self> {
        (number <= Self::MAX).then_some(Self(number))
    }

    /// Draw a uniformly random identifier.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=Self::MAX))
    }

    pub fn number(self) -> u16 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "APT-{:04}", self.0)
    }
}

/// Immutable record of a booked and paid appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedAppointment {
    pub id: AppointmentId,
    pub doctor: String,
    pub specialty: Specialty,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub location: String,
    pub symptoms: String,
    pub fee: Fee,
    pub payment_method: PaymentMethod,
}

impl ConfirmedAppointment {
    /// Convert a complete draft. Returns `None` if specialty, date, or time
    /// are still unset.
    pub fn from_draft(draft: &BookingDraft, id: AppointmentId, location: &str, fee: Fee) -> Option<Self> {
        let specialty = draft.specialty_needed?;
        Some(Self {
            id,
            doctor: specialty.doctor().to_string(),
            specialty,
            date: draft.preferred_date?,
            time: draft.preferred_time?,
            location: location.to_string(),
            symptoms: draft.symptoms.trim().to_string(),
            fee,
            payment_method: draft.payment_method,
        })
    }

    /// Date as entered by the patient (`YYYY-MM-DD`).
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Where the shell should navigate after the flow ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    DashboardHome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_id_is_zero_padded() {
        assert_eq!(AppointmentId::new(7).unwrap().to_string(), "APT-0007");
        assert_eq!(AppointmentId::new(0).unwrap().to_string(), "APT-0000");
        assert_eq!(AppointmentId::new(9999).unwrap().to_string(), "APT-9999");
        assert!(AppointmentId::new(10_000).is_none());
    }

    #[test]
    fn test_generated_ids_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let id = AppointmentId::generate(&mut rng);
            let text = id.to_string();
            assert!(id.number() <= AppointmentId::MAX);
            assert_eq!(text.len(), 8);
            assert!(text.starts_with("APT-"));
            assert!(text[4..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_fee_display() {
        assert_eq!(Fee::new(10_000, "MK").to_string(), "MK10000");
    }

    #[test]
    fn test_from_draft_requires_schedule() {
        let draft = BookingDraft {
            symptoms: "headache".to_string(),
            specialty_needed: Some(Specialty::Neurology),
            ..Default::default()
        };
        let id = AppointmentId::new(1).unwrap();
        assert!(ConfirmedAppointment::from_draft(&draft, id, "Ward 1", Fee::new(1, "MK")).is_none());

        let draft = BookingDraft {
            preferred_date: NaiveDate::from_ymd_opt(2030, 1, 2),
            preferred_time: TimeSlot::from_label("1:30 PM"),
            ..draft
        };
        let confirmed = ConfirmedAppointment::from_draft(&draft, id, "Ward 1", Fee::new(1, "MK")).unwrap();
        assert_eq!(confirmed.doctor, "Dr. David Miller");
        assert_eq!(confirmed.date_label(), "2030-01-02");
        assert_eq!(confirmed.time.label(), "1:30 PM");
        assert_eq!(confirmed.location, "Ward 1");
    }
}
