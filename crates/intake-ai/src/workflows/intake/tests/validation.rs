use super::common::valid_form;
use crate::workflows::intake::form::{FormField, StepKey};
use crate::workflows::intake::validation::{validate_full, validate_step};

#[test]
fn valid_form_passes_every_step() {
    let form = valid_form();
    for step in [StepKey::Personal, StepKey::Financial, StepKey::Situation] {
        assert!(validate_step(step, &form).is_ok(), "step {step:?} should pass");
    }
    assert!(validate_full(&form).is_ok());
}

#[test]
fn short_name_fails_personal_step_only() {
    let mut form = valid_form();
    form.name = "L".to_string();

    let issues = validate_step(StepKey::Personal, &form).expect_err("short name rejected");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, FormField::Name);
    assert_eq!(issues[0].key, "validation.name.tooShort");

    // later steps are untouched by a personal-step failure
    assert!(validate_step(StepKey::Financial, &form).is_ok());
    assert!(validate_step(StepKey::Situation, &form).is_ok());
}

#[test]
fn one_issue_per_field_in_field_order() {
    let mut form = valid_form();
    form.name.clear();
    form.email = "not-an-email".to_string();

    let issues = validate_step(StepKey::Personal, &form).expect_err("two fields fail");
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].field, FormField::Name);
    assert_eq!(issues[1].field, FormField::Email);
}

#[test]
fn phone_requires_ten_digits() {
    let mut form = valid_form();
    form.phone = "+971 50 123".to_string();
    let issues = validate_step(StepKey::Personal, &form).expect_err("too few digits");
    assert_eq!(issues[0].key, "validation.phone.tooShort");

    // punctuation does not count toward the minimum, digits do
    form.phone = "(050) 123-4567 ext".to_string();
    assert!(validate_step(StepKey::Personal, &form).is_ok());
}

#[test]
fn email_shape_rejects_obvious_malformations() {
    let mut form = valid_form();
    for bad in ["plain", "no@domain", "two@@example.com", "a b@example.com", "@example.com"] {
        form.email = bad.to_string();
        assert!(
            validate_step(StepKey::Personal, &form).is_err(),
            "{bad} should fail"
        );
    }
    form.email = "ok@sub.example.com".to_string();
    assert!(validate_step(StepKey::Personal, &form).is_ok());
}

#[test]
fn numeric_fields_reject_negatives_and_non_numbers() {
    let mut form = valid_form();

    form.dependents = "-1".to_string();
    let issues = validate_step(StepKey::Financial, &form).expect_err("negative dependents");
    assert_eq!(issues[0].key, "validation.dependents.invalid");

    form.dependents = "two".to_string();
    assert!(validate_step(StepKey::Financial, &form).is_err());

    form.dependents = String::new();
    assert!(
        validate_step(StepKey::Financial, &form).is_err(),
        "an empty numeric field is not a number"
    );

    form.dependents = "0".to_string();
    form.monthly_income = "1250.50".to_string();
    assert!(validate_step(StepKey::Financial, &form).is_ok());
}

#[test]
fn narrative_fields_require_ten_characters() {
    let mut form = valid_form();
    form.reason_for_applying = "help".to_string();
    let issues = validate_step(StepKey::Situation, &form).expect_err("too short");
    assert_eq!(issues[0].field, FormField::ReasonForApplying);
    assert_eq!(issues[0].key, "validation.reasonForApplying.tooShort");
}

#[test]
fn full_schema_is_the_union_of_all_steps() {
    let mut form = valid_form();
    form.name.clear();
    form.dependents = "x".to_string();
    form.reason_for_applying = "no".to_string();

    let issues = validate_full(&form).expect_err("three steps fail");
    let fields: Vec<FormField> = issues.iter().map(|i| i.field).collect();
    assert_eq!(
        fields,
        vec![
            FormField::Name,
            FormField::Dependents,
            FormField::ReasonForApplying
        ]
    );
}
