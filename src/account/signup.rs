//! Patient registration form.

use chrono::NaiveDate;

use super::{EntryList, FormError, require};
use crate::backend::NewAccount;
use crate::models::AllergySeverity;

/// Maximum length of the chronic illness note, in characters.
pub const CHRONIC_ILLNESS_LIMIT: usize = 150;

/// Collapsible section of the signup form. Exactly one is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupSection {
    #[default]
    Personal,
    Medical,
    Credentials,
}

impl SignupSection {
    pub const ALL: [SignupSection; 3] = [
        SignupSection::Personal,
        SignupSection::Medical,
        SignupSection::Credentials,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SignupSection::Personal => "Personal Details",
            SignupSection::Medical => "Medical History (Optional)",
            SignupSection::Credentials => "Login Credentials",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widowed => "Widowed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodType {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
    Unknown,
}

impl BloodType {
    pub const ALL: [BloodType; 9] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
        BloodType::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
            BloodType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: String,
    pub nationality: String,
    pub phone_number: String,
    /// Optional.
    pub postal_address: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct NextOfKin {
    pub name: String,
    pub relationship: String,
    /// Optional.
    pub email: String,
    pub phone_number: String,
    /// Optional.
    pub postal_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationEntry {
    pub pill_name: String,
    pub dosage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergyEntry {
    pub name: String,
    pub reaction_type: String,
    pub severity: Option<AllergySeverity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyHistoryEntry {
    pub relation: String,
    pub condition: String,
}

/// Optional medical background.
#[derive(Debug, Clone, Default)]
pub struct MedicalHistory {
    pub blood_type: Option<BloodType>,
    chronic_illness: String,
    pub medications: EntryList<MedicationEntry>,
    pub allergies: EntryList<AllergyEntry>,
    pub family_history: EntryList<FamilyHistoryEntry>,
    pub additional_info: String,
}

impl MedicalHistory {
    pub fn chronic_illness(&self) -> &str {
        &self.chronic_illness
    }

    /// Set the chronic illness note, cut to [`CHRONIC_ILLNESS_LIMIT`] characters.
    pub fn set_chronic_illness(&mut self, text: &str) {
        self.chronic_illness = text.chars().take(CHRONIC_ILLNESS_LIMIT).collect();
    }

    /// Counter shown under the note, e.g. `12/150 characters`.
    pub fn chronic_illness_counter(&self) -> String {
        format!("{}/{} characters", self.chronic_illness.chars().count(), CHRONIC_ILLNESS_LIMIT)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_confirm_password: bool,
}

/// Full signup form state.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    expanded: SignupSection,
    pub personal: PersonalDetails,
    pub kin: NextOfKin,
    pub medical: MedicalHistory,
    pub credentials: Credentials,
}

impl SignupForm {
    pub fn expanded(&self) -> SignupSection {
        self.expanded
    }

    pub fn is_expanded(&self, section: SignupSection) -> bool {
        self.expanded == section
    }

    /// Expand `section` and collapse the others. Toggling the open section
    /// keeps it open.
    pub fn toggle(&mut self, section: SignupSection) {
        self.expanded = section;
    }

    /// Validate required fields in display order, then the password match.
    ///
    /// On a missing field the containing section is expanded so the patient
    /// lands on it.
    pub fn submit(&mut self) -> Result<NewAccount, FormError> {
        match self.validate() {
            Err(FormError::MissingField(label)) => {
                if let Some(section) = self.section_of(label) {
                    self.expanded = section;
                }
                Err(FormError::MissingField(label))
            }
            Err(FormError::PasswordMismatch) => {
                self.expanded = SignupSection::Credentials;
                Err(FormError::PasswordMismatch)
            }
            ok => ok,
        }
    }

    /// Validate without touching the expanded section.
    pub fn validate(&self) -> Result<NewAccount, FormError> {
        self.validate_personal()?;
        self.validate_credentials()?;

        let creds = &self.credentials;
        if creds.password != creds.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(NewAccount {
            username: creds.username.trim().to_string(),
            full_name: format!("{} {}", self.personal.first_name.trim(), self.personal.last_name.trim()),
            email: self.personal.email.trim().to_string(),
        })
    }

    fn validate_personal(&self) -> Result<(), FormError> {
        let p = &self.personal;
        require(&p.first_name, "First name")?;
        require(&p.last_name, "Last name")?;
        if p.date_of_birth.is_none() {
            return Err(FormError::MissingField("Date of birth"));
        }
        if p.gender.is_none() {
            return Err(FormError::MissingField("Gender"));
        }
        if p.marital_status.is_none() {
            return Err(FormError::MissingField("Marital status"));
        }
        require(&p.occupation, "Occupation")?;
        require(&p.nationality, "Nationality")?;
        require(&p.phone_number, "Phone number")?;
        require(&p.email, "Email")?;

        let k = &self.kin;
        require(&k.name, "Next of kin name")?;
        require(&k.relationship, "Relationship")?;
        require(&k.phone_number, "Next of kin phone number")?;
        Ok(())
    }

    fn validate_credentials(&self) -> Result<(), FormError> {
        let c = &self.credentials;
        require(&c.username, "Username")?;
        require(&c.password, "Password")?;
        require(&c.confirm_password, "Confirm password")?;
        Ok(())
    }

    fn section_of(&self, label: &str) -> Option<SignupSection> {
        match label {
            "Username" | "Password" | "Confirm password" => Some(SignupSection::Credentials),
            _ if self.validate_personal().is_err() => Some(SignupSection::Personal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> SignupForm {
        let mut form = SignupForm::default();
        form.personal = PersonalDetails {
            first_name: "Chikondi".to_string(),
            last_name: "Phiri".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 1),
            gender: Some(Gender::Female),
            marital_status: Some(MaritalStatus::Single),
            occupation: "Teacher".to_string(),
            nationality: "Malawian".to_string(),
            phone_number: "0881234567".to_string(),
            postal_address: String::new(),
            email: "chikondi@example.com".to_string(),
        };
        form.kin = NextOfKin {
            name: "Tadala Phiri".to_string(),
            relationship: "Sister".to_string(),
            phone_number: "0991112222".to_string(),
            ..Default::default()
        };
        form.credentials = Credentials {
            username: "chikondi".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            ..Default::default()
        };
        form
    }

    #[test]
    fn test_exactly_one_section_expanded() {
        let mut form = SignupForm::default();
        assert_eq!(form.expanded(), SignupSection::Personal);

        form.toggle(SignupSection::Medical);
        let open: Vec<_> = SignupSection::ALL.iter().filter(|s| form.is_expanded(**s)).collect();
        assert_eq!(open, vec![&SignupSection::Medical]);

        // Toggling the open section keeps it open
        form.toggle(SignupSection::Medical);
        assert!(form.is_expanded(SignupSection::Medical));
    }

    #[test]
    fn test_chronic_illness_is_capped() {
        let mut medical = MedicalHistory::default();
        medical.set_chronic_illness(&"a".repeat(200));
        assert_eq!(medical.chronic_illness().chars().count(), CHRONIC_ILLNESS_LIMIT);
        assert_eq!(medical.chronic_illness_counter(), "150/150 characters");

        medical.set_chronic_illness("asthma");
        assert_eq!(medical.chronic_illness_counter(), "6/150 characters");
    }

    #[test]
    fn test_complete_form_validates() {
        let account = complete_form().validate().unwrap();
        assert_eq!(account.username, "chikondi");
        assert_eq!(account.full_name, "Chikondi Phiri");
        assert_eq!(account.email, "chikondi@example.com");
    }

    #[test]
    fn test_medical_history_is_optional() {
        let form = complete_form();
        assert!(form.medical.blood_type.is_none());
        assert_eq!(form.medical.medications.len(), 1);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reports_first_missing_field() {
        let mut form = complete_form();
        form.personal.occupation.clear();
        form.credentials.username.clear();
        assert_eq!(form.validate(), Err(FormError::MissingField("Occupation")));
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = complete_form();
        form.credentials.confirm_password = "hunter23".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn test_submit_expands_offending_section() {
        let mut form = complete_form();
        form.toggle(SignupSection::Medical);
        form.credentials.password.clear();
        assert_eq!(form.submit(), Err(FormError::MissingField("Password")));
        assert_eq!(form.expanded(), SignupSection::Credentials);

        let mut form = complete_form();
        form.toggle(SignupSection::Credentials);
        form.kin.phone_number = " ".to_string();
        assert!(form.submit().is_err());
        assert_eq!(form.expanded(), SignupSection::Personal);
    }
}
