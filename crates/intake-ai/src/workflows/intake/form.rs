//! Flat form record, field identifiers, and the static step table consumed
//! uniformly by validation, error clearing, and focus logic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The complete value set of the intake form. Every field is a string,
/// including the numeric ones, so form binding and draft persistence stay
/// uniform; numeric interpretation happens in validation and in the
/// [`super::state::ApplicationState`] projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionForm {
    pub name: String,
    pub national_id: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub marital_status: String,
    pub dependents: String,
    pub employment_status: String,
    pub monthly_income: String,
    pub housing_status: String,
    pub financial_situation: String,
    pub employment_circumstance: String,
    pub reason_for_applying: String,
}

impl SubmissionForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::NationalId => &self.national_id,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::Gender => &self.gender,
            FormField::Address => &self.address,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Country => &self.country,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::MaritalStatus => &self.marital_status,
            FormField::Dependents => &self.dependents,
            FormField::EmploymentStatus => &self.employment_status,
            FormField::MonthlyIncome => &self.monthly_income,
            FormField::HousingStatus => &self.housing_status,
            FormField::FinancialSituation => &self.financial_situation,
            FormField::EmploymentCircumstance => &self.employment_circumstance,
            FormField::ReasonForApplying => &self.reason_for_applying,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::NationalId => &mut self.national_id,
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::Gender => &mut self.gender,
            FormField::Address => &mut self.address,
            FormField::City => &mut self.city,
            FormField::State => &mut self.state,
            FormField::Country => &mut self.country,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::MaritalStatus => &mut self.marital_status,
            FormField::Dependents => &mut self.dependents,
            FormField::EmploymentStatus => &mut self.employment_status,
            FormField::MonthlyIncome => &mut self.monthly_income,
            FormField::HousingStatus => &mut self.housing_status,
            FormField::FinancialSituation => &mut self.financial_situation,
            FormField::EmploymentCircumstance => &mut self.employment_circumstance,
            FormField::ReasonForApplying => &mut self.reason_for_applying,
        };
        *slot = value.into();
    }
}

/// Identifier for each form field, used as the key of validation errors,
/// touch marks, and focus requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    NationalId,
    DateOfBirth,
    Gender,
    Address,
    City,
    State,
    Country,
    Phone,
    Email,
    MaritalStatus,
    Dependents,
    EmploymentStatus,
    MonthlyIncome,
    HousingStatus,
    FinancialSituation,
    EmploymentCircumstance,
    ReasonForApplying,
}

impl FormField {
    pub const ALL: [FormField; 18] = [
        FormField::Name,
        FormField::NationalId,
        FormField::DateOfBirth,
        FormField::Gender,
        FormField::Address,
        FormField::City,
        FormField::State,
        FormField::Country,
        FormField::Phone,
        FormField::Email,
        FormField::MaritalStatus,
        FormField::Dependents,
        FormField::EmploymentStatus,
        FormField::MonthlyIncome,
        FormField::HousingStatus,
        FormField::FinancialSituation,
        FormField::EmploymentCircumstance,
        FormField::ReasonForApplying,
    ];

    /// The persisted/camelCase name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::NationalId => "nationalId",
            FormField::DateOfBirth => "dateOfBirth",
            FormField::Gender => "gender",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::State => "state",
            FormField::Country => "country",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::MaritalStatus => "maritalStatus",
            FormField::Dependents => "dependents",
            FormField::EmploymentStatus => "employmentStatus",
            FormField::MonthlyIncome => "monthlyIncome",
            FormField::HousingStatus => "housingStatus",
            FormField::FinancialSituation => "financialSituation",
            FormField::EmploymentCircumstance => "employmentCircumstance",
            FormField::ReasonForApplying => "reasonForApplying",
        }
    }

    /// The step that owns this field.
    pub fn step(self) -> StepKey {
        for step in STEPS {
            if step.fields().contains(&self) {
                return step;
            }
        }
        unreachable!("every field belongs to a step");
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered pages of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    Personal,
    Financial,
    Situation,
}

/// Fixed step sequence; navigation and submission gating index into this.
pub const STEPS: [StepKey; 3] = [StepKey::Personal, StepKey::Financial, StepKey::Situation];

impl StepKey {
    pub const fn label(self) -> &'static str {
        match self {
            StepKey::Personal => "personal",
            StepKey::Financial => "financial",
            StepKey::Situation => "situation",
        }
    }

    /// The ordered field subset this step owns. Validation, error clearing,
    /// and focus all consume this same table.
    pub const fn fields(self) -> &'static [FormField] {
        match self {
            StepKey::Personal => &[
                FormField::Name,
                FormField::NationalId,
                FormField::DateOfBirth,
                FormField::Gender,
                FormField::Address,
                FormField::City,
                FormField::State,
                FormField::Country,
                FormField::Phone,
                FormField::Email,
            ],
            StepKey::Financial => &[
                FormField::MaritalStatus,
                FormField::Dependents,
                FormField::EmploymentStatus,
                FormField::MonthlyIncome,
                FormField::HousingStatus,
            ],
            StepKey::Situation => &[
                FormField::FinancialSituation,
                FormField::EmploymentCircumstance,
                FormField::ReasonForApplying,
            ],
        }
    }

    pub const fn index(self) -> usize {
        match self {
            StepKey::Personal => 0,
            StepKey::Financial => 1,
            StepKey::Situation => 2,
        }
    }
}

const DRAFT_PREFIX: &str = "draft:";

/// Which application a form session belongs to: a brand-new one or an
/// existing submission being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationRef {
    New,
    Existing(String),
}

impl ApplicationRef {
    /// Storage key of this application's draft.
    pub fn draft_key(&self) -> String {
        match self {
            ApplicationRef::New => format!("{DRAFT_PREFIX}new"),
            ApplicationRef::Existing(id) => format!("{DRAFT_PREFIX}{id}"),
        }
    }
}

impl fmt::Display for ApplicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationRef::New => f.write_str("new"),
            ApplicationRef::Existing(id) => f.write_str(id),
        }
    }
}
