//! Per-step and full-form validation rules.
//!
//! Failures carry a stable message key, never display copy; the localized
//! resolver maps keys to on-screen text. Exactly one issue is retained per
//! field, the first rule that fails.

use super::form::{FormField, StepKey, SubmissionForm, STEPS};

/// A single field failure: which field, and the stable message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: FormField,
    pub key: &'static str,
}

/// Validate the field subset owned by one step, in field order.
pub fn validate_step(step: StepKey, form: &SubmissionForm) -> Result<(), Vec<ValidationIssue>> {
    collect_issues(step.fields(), form)
}

/// Validate the union of all step schemas.
pub fn validate_full(form: &SubmissionForm) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    for step in STEPS {
        if let Err(step_issues) = collect_issues(step.fields(), form) {
            issues.extend(step_issues);
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate an arbitrary field subset, e.g. only the fields currently shown.
pub fn validate_fields(
    fields: &[FormField],
    form: &SubmissionForm,
) -> Result<(), Vec<ValidationIssue>> {
    collect_issues(fields, form)
}

fn collect_issues(
    fields: &[FormField],
    form: &SubmissionForm,
) -> Result<(), Vec<ValidationIssue>> {
    let issues: Vec<ValidationIssue> = fields
        .iter()
        .filter_map(|&field| {
            check_field(field, form.value(field)).map(|key| ValidationIssue { field, key })
        })
        .collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_field(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Name => min_chars(value, 2, "validation.name.tooShort"),
        FormField::NationalId => min_chars(value, 5, "validation.nationalId.tooShort"),
        FormField::DateOfBirth => required(value, "validation.dateOfBirth.required"),
        FormField::Gender => required(value, "validation.gender.required"),
        FormField::Address => min_chars(value, 5, "validation.address.tooShort"),
        FormField::City => min_chars(value, 2, "validation.city.tooShort"),
        FormField::State => min_chars(value, 2, "validation.state.tooShort"),
        FormField::Country => min_chars(value, 2, "validation.country.tooShort"),
        FormField::Phone => {
            let digits = value.chars().filter(char::is_ascii_digit).count();
            (digits < 10).then_some("validation.phone.tooShort")
        }
        FormField::Email => (!is_email_shaped(value)).then_some("validation.email.invalid"),
        FormField::MaritalStatus => required(value, "validation.maritalStatus.required"),
        FormField::Dependents => non_negative_number(value, "validation.dependents.invalid"),
        FormField::EmploymentStatus => required(value, "validation.employmentStatus.required"),
        FormField::MonthlyIncome => non_negative_number(value, "validation.monthlyIncome.invalid"),
        FormField::HousingStatus => required(value, "validation.housingStatus.required"),
        FormField::FinancialSituation => {
            min_chars(value, 10, "validation.financialSituation.tooShort")
        }
        FormField::EmploymentCircumstance => {
            min_chars(value, 10, "validation.employmentCircumstance.tooShort")
        }
        FormField::ReasonForApplying => {
            min_chars(value, 10, "validation.reasonForApplying.tooShort")
        }
    }
}

fn required(value: &str, key: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(key)
}

fn min_chars(value: &str, min: usize, key: &'static str) -> Option<&'static str> {
    (value.chars().count() < min).then_some(key)
}

fn non_negative_number(value: &str, key: &'static str) -> Option<&'static str> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => None,
        _ => Some(key),
    }
}

/// Minimal RFC-shape check: one `@`, a non-empty local part, and a domain
/// with a dot that neither starts nor ends a label.
fn is_email_shaped(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
