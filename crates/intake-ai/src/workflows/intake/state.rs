//! Derived projections of the flat form record.
//!
//! `ApplicationState` is the nested personal/family/situation shape used as
//! the assist request payload; it is never persisted. The normalization
//! helpers turn a stored submission back into editable form values.

use serde::{Deserialize, Serialize};

use super::form::SubmissionForm;
use super::submissions::Submission;

/// Nested projection of the form grouped by concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub personal: PersonalState,
    pub family: FamilyState,
    pub situation: SituationState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalState {
    pub name: String,
    pub national_id: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyState {
    pub marital_status: String,
    pub dependents: f64,
    pub employment_status: String,
    pub monthly_income: f64,
    pub housing_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SituationState {
    pub current_financial_situation: String,
    pub employment_circumstances: String,
    pub reason_for_applying: String,
}

impl ApplicationState {
    /// Project the flat form into the nested shape. Numeric fields parse
    /// leniently; anything unparseable becomes zero.
    pub fn from_form(form: &SubmissionForm) -> Self {
        Self {
            personal: PersonalState {
                name: form.name.clone(),
                national_id: form.national_id.clone(),
                dob: form.date_of_birth.clone(),
                gender: form.gender.clone(),
                address: form.address.clone(),
                city: form.city.clone(),
                state: form.state.clone(),
                country: form.country.clone(),
                phone: form.phone.clone(),
                email: form.email.clone(),
            },
            family: FamilyState {
                marital_status: form.marital_status.clone(),
                dependents: lenient_number(&form.dependents),
                employment_status: form.employment_status.clone(),
                monthly_income: lenient_number(&form.monthly_income),
                housing_status: form.housing_status.clone(),
            },
            situation: SituationState {
                current_financial_situation: form.financial_situation.clone(),
                employment_circumstances: form.employment_circumstance.clone(),
                reason_for_applying: form.reason_for_applying.clone(),
            },
        }
    }
}

fn lenient_number(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Clamp a stored date value to the `YYYY-MM-DD` shape date inputs accept;
/// anything else becomes empty.
pub fn to_date_input(value: &str) -> String {
    let date = match value.split_once('T') {
        Some((d, _)) => d,
        None => value,
    };
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if shaped {
        date.to_string()
    } else {
        String::new()
    }
}

/// Turn a stored submission back into form values for editing: id and
/// timestamps are dropped (the store reassigns them) and the date of birth
/// is clamped to the date-input shape.
pub fn normalize_initial_values(submission: &Submission) -> SubmissionForm {
    let mut form = submission.form.clone();
    form.date_of_birth = to_date_input(&form.date_of_birth);
    form
}
