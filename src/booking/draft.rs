//! In-progress booking form data and its per-stage requirements.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the four ordered phases of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Symptoms,
    Schedule,
    Payment,
    Confirmation,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Symptoms, Stage::Schedule, Stage::Payment, Stage::Confirmation];

    /// 1-based position in the flow.
    pub fn number(self) -> usize {
        match self {
            Stage::Symptoms => 1,
            Stage::Schedule => 2,
            Stage::Payment => 3,
            Stage::Confirmation => 4,
        }
    }

    /// Short label for the progress indicator.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Symptoms => "Symptoms",
            Stage::Schedule => "Schedule",
            Stage::Payment => "Payment",
            Stage::Confirmation => "Confirmation",
        }
    }

    /// Heading shown above the stage form.
    pub fn title(self) -> &'static str {
        match self {
            Stage::Symptoms => "Describe your symptoms",
            Stage::Schedule => "Choose appointment time",
            Stage::Payment => "Payment",
            Stage::Confirmation => "Appointment Confirmed!",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Symptoms => Some(Stage::Schedule),
            Stage::Schedule => Some(Stage::Payment),
            Stage::Payment => Some(Stage::Confirmation),
            Stage::Confirmation => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Symptoms => None,
            Stage::Schedule => Some(Stage::Symptoms),
            Stage::Payment => Some(Stage::Schedule),
            Stage::Confirmation => Some(Stage::Payment),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Confirmation
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Stage::ALL.len(), self.name())
    }
}

/// Kind of doctor the patient needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialty {
    General,
    Dermatology,
    Cardiology,
    Orthopedics,
    Pediatrics,
    Gynecology,
    Neurology,
    Psychiatry,
    Other,
}

impl Specialty {
    pub const ALL: [Specialty; 9] = [
        Specialty::General,
        Specialty::Dermatology,
        Specialty::Cardiology,
        Specialty::Orthopedics,
        Specialty::Pediatrics,
        Specialty::Gynecology,
        Specialty::Neurology,
        Specialty::Psychiatry,
        Specialty::Other,
    ];

    /// Label used in the specialty picker.
    pub fn label(self) -> &'static str {
        match self {
            Specialty::General => "General Practitioner",
            Specialty::Dermatology => "Dermatologist",
            Specialty::Cardiology => "Cardiologist",
            Specialty::Orthopedics => "Orthopedic Surgeon",
            Specialty::Pediatrics => "Pediatrician",
            Specialty::Gynecology => "Gynecologist",
            Specialty::Neurology => "Neurologist",
            Specialty::Psychiatry => "Psychiatrist",
            Specialty::Other => "Other",
        }
    }

    /// Label used on the payment summary card.
    pub fn summary_label(self) -> &'static str {
        match self {
            Specialty::Other => "Specialist",
            other => other.label(),
        }
    }

    /// Doctor on duty for this specialty.
    pub fn doctor(self) -> &'static str {
        match self {
            Specialty::General => "Dr. Sarah Johnson",
            Specialty::Dermatology => "Dr. Michael Chen",
            Specialty::Cardiology => "Dr. Robert Williams",
            Specialty::Orthopedics => "Dr. Emily Davis",
            Specialty::Pediatrics => "Dr. James Wilson",
            Specialty::Gynecology => "Dr. Lisa Thompson",
            Specialty::Neurology => "Dr. David Miller",
            Specialty::Psychiatry => "Dr. Jennifer Brown",
            Specialty::Other => "Dr. Thomas Anderson",
        }
    }
}

/// A bookable half-hour slot, indexing into [`TimeSlot::LABELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(usize);

impl TimeSlot {
    /// Slot labels in display order.
    pub const LABELS: [&'static str; 12] = [
        "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "1:00 PM", "1:30 PM", "2:00 PM",
        "2:30 PM", "3:00 PM", "3:30 PM",
    ];

    /// All slots in display order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..Self::LABELS.len()).map(TimeSlot)
    }

    /// Look up a slot by its exact label.
    pub fn from_label(label: &str) -> Option<TimeSlot> {
        Self::LABELS.iter().position(|l| *l == label).map(TimeSlot)
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self.0]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the booking fee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    MobileMoney,
    CreditCard,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "Mobile Money",
            PaymentMethod::CreditCard => "Credit/Debit Card",
        }
    }

    /// Fields that must be filled when this method is selected.
    pub fn detail_fields(self) -> &'static [Field] {
        match self {
            PaymentMethod::MobileMoney => &[Field::PhoneNumber],
            PaymentMethod::CreditCard => &[Field::CardNumber, Field::CardExpiry, Field::CardCvv],
        }
    }
}

/// Addressable draft field, used for requirement checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Symptoms,
    Specialty,
    PreferredDate,
    PreferredTime,
    PaymentMethod,
    PhoneNumber,
    CardNumber,
    CardExpiry,
    CardCvv,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Symptoms => "Symptoms",
            Field::Specialty => "Specialty",
            Field::PreferredDate => "Preferred date",
            Field::PreferredTime => "Time slot",
            Field::PaymentMethod => "Payment method",
            Field::PhoneNumber => "Mobile money number",
            Field::CardNumber => "Card number",
            Field::CardExpiry => "Expiry date",
            Field::CardCvv => "CVV",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The in-progress, not-yet-confirmed booking form.
///
/// Fields are checked for presence only; phone and card numbers are never
/// format-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub symptoms: String,
    pub specialty_needed: Option<Specialty>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<TimeSlot>,
    pub payment_method: PaymentMethod,
    pub phone_number: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvv: String,
}

impl BookingDraft {
    /// Fields required to leave `stage`.
    ///
    /// Payment requirements are derived from the current method, so switching
    /// methods never leaves a stale requirement behind.
    pub fn required_fields(&self, stage: Stage) -> Vec<Field> {
        match stage {
            Stage::Symptoms => vec![Field::Symptoms, Field::Specialty],
            Stage::Schedule => vec![Field::PreferredDate, Field::PreferredTime],
            Stage::Payment => {
                let mut fields = vec![Field::PaymentMethod];
                fields.extend_from_slice(self.payment_method.detail_fields());
                fields
            }
            Stage::Confirmation => Vec::new(),
        }
    }

    /// Required fields of `stage` that are still empty.
    pub fn missing_fields(&self, stage: Stage) -> Vec<Field> {
        self.required_fields(stage)
            .into_iter()
            .filter(|field| !self.is_filled(*field))
            .collect()
    }

    /// Whether a field holds a value.
    pub fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::Symptoms => !is_blank(&self.symptoms),
            Field::Specialty => self.specialty_needed.is_some(),
            Field::PreferredDate => self.preferred_date.is_some(),
            Field::PreferredTime => self.preferred_time.is_some(),
            Field::PaymentMethod => true,
            Field::PhoneNumber => !is_blank(&self.phone_number),
            Field::CardNumber => !is_blank(&self.card_number),
            Field::CardExpiry => !is_blank(&self.card_expiry),
            Field::CardCvv => !is_blank(&self.card_cvv),
        }
    }

    /// Identifier of the payer: the phone number, or the last four card digits.
    pub fn payer(&self) -> String {
        match self.payment_method {
            PaymentMethod::MobileMoney => self.phone_number.trim().to_string(),
            PaymentMethod::CreditCard => {
                let digits: Vec<char> = self.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
                let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
                format!("card ending {tail}")
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::Symptoms.next(), Some(Stage::Schedule));
        assert_eq!(Stage::Confirmation.next(), None);
        assert_eq!(Stage::Symptoms.previous(), None);
        assert_eq!(Stage::Confirmation.previous(), Some(Stage::Payment));
        assert_eq!(Stage::Payment.number(), 3);
        assert_eq!(Stage::Schedule.to_string(), "Step 2 of 4: Schedule");
    }

    #[test]
    fn test_time_slot_lookup() {
        let slot = TimeSlot::from_label("10:00 AM").unwrap();
        assert_eq!(slot.label(), "10:00 AM");
        assert_eq!(TimeSlot::all().count(), 12);
        assert!(TimeSlot::from_label("10:15 AM").is_none());
        assert!(TimeSlot::from_label("12:00 PM").is_none());
    }

    #[test]
    fn test_slots_are_ordered() {
        let slots: Vec<_> = TimeSlot::all().collect();
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(slots.first().unwrap().label(), "9:00 AM");
        assert_eq!(slots.last().unwrap().label(), "3:30 PM");
    }

    #[test]
    fn test_whitespace_symptoms_are_missing() {
        let draft = BookingDraft {
            symptoms: "   ".to_string(),
            specialty_needed: Some(Specialty::General),
            ..Default::default()
        };
        assert_eq!(draft.missing_fields(Stage::Symptoms), vec![Field::Symptoms]);
    }

    #[test]
    fn test_payment_requirements_follow_method() {
        let mut draft = BookingDraft::default();
        let mobile = draft.required_fields(Stage::Payment);
        assert_eq!(mobile, vec![Field::PaymentMethod, Field::PhoneNumber]);

        draft.payment_method = PaymentMethod::CreditCard;
        let card = draft.required_fields(Stage::Payment);
        assert_eq!(
            card,
            vec![Field::PaymentMethod, Field::CardNumber, Field::CardExpiry, Field::CardCvv]
        );
        assert!(!card.contains(&Field::PhoneNumber));

        draft.payment_method = PaymentMethod::MobileMoney;
        assert_eq!(draft.required_fields(Stage::Payment), mobile);
    }

    #[test]
    fn test_inactive_group_values_are_ignored() {
        let draft = BookingDraft {
            payment_method: PaymentMethod::CreditCard,
            phone_number: "0991234567".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(Stage::Payment),
            vec![Field::CardNumber, Field::CardExpiry, Field::CardCvv]
        );
    }

    #[test]
    fn test_specialty_labels() {
        assert_eq!(Specialty::Other.label(), "Other");
        assert_eq!(Specialty::Other.summary_label(), "Specialist");
        assert_eq!(Specialty::Cardiology.summary_label(), "Cardiologist");
        assert_eq!(Specialty::General.doctor(), "Dr. Sarah Johnson");
    }

    #[test]
    fn test_payer_masks_card() {
        let draft = BookingDraft {
            payment_method: PaymentMethod::CreditCard,
            card_number: "1234 5678 9012 3456".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.payer(), "card ending 3456");
    }
}
