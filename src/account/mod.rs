//! Login and account creation forms.

pub mod entry_list;
pub mod login;
pub mod signup;

use thiserror::Error;

pub use entry_list::{EntryList, EntryListError};
pub use login::LoginForm;
pub use signup::{
    AllergyEntry, BloodType, CHRONIC_ILLNESS_LIMIT, Credentials, FamilyHistoryEntry, Gender, MaritalStatus,
    MedicalHistory, MedicationEntry, NextOfKin, PersonalDetails, SignupForm, SignupSection,
};

/// Reasons a form refuses to submit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Passwords don't match")]
    PasswordMismatch,
}

pub(crate) fn require(value: &str, label: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(label))
    } else {
        Ok(())
    }
}
