//! Localized resolution of validation failures.
//!
//! Validation runs against the raw form shape and yields stable message
//! keys; this layer passes each key through the translation collaborator so
//! error copy can change per language without re-authoring the rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::form::{FormField, StepKey, SubmissionForm};
use super::validation::{self, ValidationIssue};
use crate::language::{SupportedLang, TextDirection};

/// Translation collaborator. Implementations return the key itself
/// (optionally bracket-wrapped) on a lookup miss and never fail.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Identity translator: every lookup misses. Useful for tests and for the
/// CLI, where raw keys are acceptable copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// The active language, its direction, and the translation function,
/// threaded explicitly through every component that localizes text.
#[derive(Clone)]
pub struct LocaleContext {
    pub language: SupportedLang,
    translator: Arc<dyn Translator>,
}

impl LocaleContext {
    pub fn new(language: SupportedLang, translator: Arc<dyn Translator>) -> Self {
        Self {
            language,
            translator,
        }
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    pub fn resolver(&self) -> LocalizedResolver {
        LocalizedResolver::new(Arc::clone(&self.translator))
    }
}

/// A resolved, displayable field error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Stable message key the rule produced.
    pub key: &'static str,
    /// Localized display text, or the raw key when the lookup missed.
    pub message: String,
}

/// Wraps the validation schema set with message localization.
#[derive(Clone)]
pub struct LocalizedResolver {
    translator: Arc<dyn Translator>,
}

impl LocalizedResolver {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    pub fn resolve_step(&self, step: StepKey, form: &SubmissionForm) -> BTreeMap<FormField, FieldError> {
        match validation::validate_step(step, form) {
            Ok(()) => BTreeMap::new(),
            Err(issues) => self.localize(issues),
        }
    }

    pub fn resolve_fields(
        &self,
        fields: &[FormField],
        form: &SubmissionForm,
    ) -> BTreeMap<FormField, FieldError> {
        match validation::validate_fields(fields, form) {
            Ok(()) => BTreeMap::new(),
            Err(issues) => self.localize(issues),
        }
    }

    pub fn resolve_full(&self, form: &SubmissionForm) -> BTreeMap<FormField, FieldError> {
        match validation::validate_full(form) {
            Ok(()) => BTreeMap::new(),
            Err(issues) => self.localize(issues),
        }
    }

    fn localize(&self, issues: Vec<ValidationIssue>) -> BTreeMap<FormField, FieldError> {
        let mut errors = BTreeMap::new();
        for issue in issues {
            // first failure wins per field
            errors.entry(issue.field).or_insert_with(|| FieldError {
                key: issue.key,
                message: self.display_text(issue.key),
            });
        }
        errors
    }

    fn display_text(&self, key: &'static str) -> String {
        let translated = self.translator.translate(key);
        if is_lookup_miss(&translated, key) {
            key.to_string()
        } else {
            translated
        }
    }
}

fn is_lookup_miss(translated: &str, key: &str) -> bool {
    let trimmed = translated.trim();
    trimmed.is_empty() || trimmed == key || trimmed == format!("[{key}]")
}
