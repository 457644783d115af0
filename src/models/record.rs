//! Patient medical records.

use chrono::NaiveDate;

/// Refill count at or below which a prescription is flagged.
pub const REFILL_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabStatus {
    Normal,
    Abnormal,
}

impl LabStatus {
    pub fn label(self) -> &'static str {
        match self {
            LabStatus::Normal => "Normal",
            LabStatus::Abnormal => "Abnormal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabResult {
    pub name: String,
    pub date: NaiveDate,
    pub doctor: String,
    pub status: LabStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribed_by: String,
    pub start_date: NaiveDate,
    pub refills_remaining: u32,
    pub status: MedicationStatus,
}

impl Medication {
    pub fn needs_refill(&self) -> bool {
        self.status == MedicationStatus::Active && self.refills_remaining <= REFILL_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllergySeverity {
    Mild,
    Moderate,
    Severe,
}

impl AllergySeverity {
    pub const ALL: [AllergySeverity; 3] = [AllergySeverity::Mild, AllergySeverity::Moderate, AllergySeverity::Severe];

    pub fn label(self) -> &'static str {
        match self {
            AllergySeverity::Mild => "Mild",
            AllergySeverity::Moderate => "Moderate",
            AllergySeverity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allergy {
    pub name: String,
    pub reaction: String,
    pub severity: AllergySeverity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Immunization {
    pub name: String,
    pub date: NaiveDate,
    pub provider: String,
}

/// Sections of the records page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordSection {
    #[default]
    Overview,
    LabResults,
    Medications,
    Allergies,
    Immunizations,
}

impl RecordSection {
    pub const ALL: [RecordSection; 5] = [
        RecordSection::Overview,
        RecordSection::LabResults,
        RecordSection::Medications,
        RecordSection::Allergies,
        RecordSection::Immunizations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordSection::Overview => "Overview",
            RecordSection::LabResults => "Lab Results",
            RecordSection::Medications => "Medications",
            RecordSection::Allergies => "Allergies",
            RecordSection::Immunizations => "Immunizations",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MedicalRecords {
    pub lab_results: Vec<LabResult>,
    pub medications: Vec<Medication>,
    pub allergies: Vec<Allergy>,
    pub immunizations: Vec<Immunization>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl MedicalRecords {
    /// The patient's record on file.
    pub fn sample() -> Self {
        let lab = |name: &str, date: NaiveDate, doctor: &str, status| LabResult {
            name: name.to_string(),
            date,
            doctor: doctor.to_string(),
            status,
        };
        let med = |name: &str, dosage: &str, frequency: &str, by: &str, start, refills, status| Medication {
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: frequency.to_string(),
            prescribed_by: by.to_string(),
            start_date: start,
            refills_remaining: refills,
            status,
        };

        Self {
            lab_results: vec![
                lab("Complete Blood Count (CBC)", date(2025, 4, 15), "Dr. Sarah Johnson", LabStatus::Normal),
                lab("Lipid Panel", date(2025, 4, 15), "Dr. Sarah Johnson", LabStatus::Abnormal),
                lab("Urinalysis", date(2025, 1, 10), "Dr. Michael Chen", LabStatus::Normal),
            ],
            medications: vec![
                med("Lisinopril", "10mg", "Once daily", "Dr. Robert Williams", date(2025, 3, 20), 2, MedicationStatus::Active),
                med("Metformin", "500mg", "Twice daily", "Dr. Sarah Johnson", date(2025, 4, 15), 3, MedicationStatus::Active),
                med(
                    "Amoxicillin",
                    "500mg",
                    "Three times daily for 10 days",
                    "Dr. Sarah Johnson",
                    date(2025, 1, 5),
                    0,
                    MedicationStatus::Completed,
                ),
            ],
            allergies: vec![
                Allergy {
                    name: "Penicillin".to_string(),
                    reaction: "Rash".to_string(),
                    severity: AllergySeverity::Moderate,
                },
                Allergy {
                    name: "Peanuts".to_string(),
                    reaction: "Anaphylaxis".to_string(),
                    severity: AllergySeverity::Severe,
                },
            ],
            immunizations: vec![
                Immunization {
                    name: "Influenza (Flu)".to_string(),
                    date: date(2024, 10, 5),
                    provider: "MediCare Clinic".to_string(),
                },
                Immunization {
                    name: "COVID-19".to_string(),
                    date: date(2024, 1, 15),
                    provider: "MediCare Clinic".to_string(),
                },
                Immunization {
                    name: "Tetanus, Diphtheria, Pertussis (Tdap)".to_string(),
                    date: date(2023, 5, 20),
                    provider: "Community Health Center".to_string(),
                },
            ],
        }
    }

    pub fn latest_lab_date(&self) -> Option<NaiveDate> {
        self.lab_results.iter().map(|r| r.date).max()
    }

    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.status == MedicationStatus::Active)
    }

    pub fn past_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.status == MedicationStatus::Completed)
    }

    pub fn medications_needing_refill(&self) -> usize {
        self.medications.iter().filter(|m| m.needs_refill()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_lab_date() {
        let records = MedicalRecords::sample();
        assert_eq!(records.latest_lab_date(), NaiveDate::from_ymd_opt(2025, 4, 15));
        assert_eq!(MedicalRecords::default().latest_lab_date(), None);
    }

    #[test]
    fn test_refills_ignore_completed_courses() {
        let records = MedicalRecords::sample();
        assert_eq!(records.medications_needing_refill(), 2);
        assert_eq!(records.active_medications().count(), 2);
        assert_eq!(records.past_medications().next().unwrap().name, "Amoxicillin");
    }

    #[test]
    fn test_refill_threshold() {
        let mut records = MedicalRecords::sample();
        records.medications[1].refills_remaining = REFILL_THRESHOLD + 1;
        assert_eq!(records.medications_needing_refill(), 1);
    }
}
