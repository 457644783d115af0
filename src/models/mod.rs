//! Data models for appointments, medical records, and health tips.

pub mod appointment;
pub mod health_tip;
pub mod record;

pub use appointment::{Appointment, AppointmentBook, AppointmentStatus, AppointmentTab, StatusFilter};
pub use health_tip::{CategorySummary, HealthTip, HealthTips, TipCategory};
pub use record::{
    Allergy, AllergySeverity, Immunization, LabResult, LabStatus, MedicalRecords, Medication, MedicationStatus,
    RecordSection,
};
