//! AI-assisted drafting for the narrative fields.
//!
//! The pipeline builds a generate or refine prompt from the current
//! application facts, attempts one remote completion when credentials are
//! configured, and otherwise (or on any failure) falls back to a
//! deterministic offline result. Callers present the returned text as an
//! editable suggestion; nothing is written into the form here.

pub mod client;
pub mod prompts;
pub mod service;

use serde::{Deserialize, Serialize};

use super::form::FormField;
use super::state::ApplicationState;
use crate::language::SupportedLang;

pub use client::{ChatMessage, ChatRequest, CompletionClient, CompletionError, OpenAiClient, Role};
pub use service::AssistService;

/// Semantic keys of the three assisted narrative prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssistFieldKey {
    CurrentFinancialSituation,
    EmploymentCircumstances,
    ReasonForApplying,
}

impl AssistFieldKey {
    pub const ALL: [AssistFieldKey; 3] = [
        AssistFieldKey::CurrentFinancialSituation,
        AssistFieldKey::EmploymentCircumstances,
        AssistFieldKey::ReasonForApplying,
    ];

    /// The form field this assist key writes into. The mapping is bijective;
    /// [`AssistFieldKey::from_target`] is its inverse.
    pub const fn target_field(self) -> FormField {
        match self {
            AssistFieldKey::CurrentFinancialSituation => FormField::FinancialSituation,
            AssistFieldKey::EmploymentCircumstances => FormField::EmploymentCircumstance,
            AssistFieldKey::ReasonForApplying => FormField::ReasonForApplying,
        }
    }

    pub const fn from_target(field: FormField) -> Option<AssistFieldKey> {
        match field {
            FormField::FinancialSituation => Some(AssistFieldKey::CurrentFinancialSituation),
            FormField::EmploymentCircumstance => Some(AssistFieldKey::EmploymentCircumstances),
            FormField::ReasonForApplying => Some(AssistFieldKey::ReasonForApplying),
            _ => None,
        }
    }
}

/// One assist invocation: which narrative field, the applicant facts, the
/// output language, and optional existing text to refine.
#[derive(Debug, Clone)]
pub struct AssistRequest {
    pub field_key: AssistFieldKey,
    pub application: ApplicationState,
    pub language: SupportedLang,
    pub source_text: Option<String>,
}

impl AssistRequest {
    pub fn generate(
        field_key: AssistFieldKey,
        application: ApplicationState,
        language: SupportedLang,
    ) -> Self {
        Self {
            field_key,
            application,
            language,
            source_text: None,
        }
    }

    pub fn refine(
        field_key: AssistFieldKey,
        application: ApplicationState,
        language: SupportedLang,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            field_key,
            application,
            language,
            source_text: Some(source_text.into()),
        }
    }

    pub(crate) fn seed(&self) -> Option<&str> {
        self.source_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
