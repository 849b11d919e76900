use std::collections::HashMap;
use std::sync::Arc;

use super::common::valid_form;
use crate::workflows::intake::form::{FormField, StepKey};
use crate::workflows::intake::localize::{LocalizedResolver, Translator};

struct TableTranslator {
    table: HashMap<&'static str, &'static str>,
}

impl TableTranslator {
    fn new(entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            table: entries.iter().copied().collect(),
        }
    }
}

impl Translator for TableTranslator {
    fn translate(&self, key: &str) -> String {
        match self.table.get(key) {
            Some(copy) => (*copy).to_string(),
            None => format!("[{key}]"),
        }
    }
}

#[test]
fn translates_message_keys_to_display_copy() {
    let resolver = LocalizedResolver::new(Arc::new(TableTranslator::new(&[(
        "validation.name.tooShort",
        "Name must be at least 2 characters long",
    )])));

    let mut form = valid_form();
    form.name = "L".to_string();

    let errors = resolver.resolve_step(StepKey::Personal, &form);
    let error = errors.get(&FormField::Name).expect("name error present");
    assert_eq!(error.key, "validation.name.tooShort");
    assert_eq!(error.message, "Name must be at least 2 characters long");
}

#[test]
fn lookup_miss_falls_back_to_the_raw_key() {
    // table translator echoes "[key]" on miss; the resolver must strip
    // that convention back to the raw key
    let resolver = LocalizedResolver::new(Arc::new(TableTranslator::new(&[])));

    let mut form = valid_form();
    form.email = "nope".to_string();

    let errors = resolver.resolve_step(StepKey::Personal, &form);
    let error = errors.get(&FormField::Email).expect("email error present");
    assert_eq!(error.message, "validation.email.invalid");
}

#[test]
fn blank_translation_falls_back_to_the_raw_key() {
    let resolver = LocalizedResolver::new(Arc::new(|_: &str| String::new()));

    let mut form = valid_form();
    form.gender.clear();

    let errors = resolver.resolve_step(StepKey::Personal, &form);
    let error = errors.get(&FormField::Gender).expect("gender error present");
    assert_eq!(error.message, "validation.gender.required");
}

#[test]
fn clean_form_resolves_to_no_errors() {
    let resolver = LocalizedResolver::new(Arc::new(TableTranslator::new(&[])));
    assert!(resolver.resolve_full(&valid_form()).is_empty());
}
