//! The multi-step intake workflow: form domain, validation, drafts,
//! submissions, stepper orchestration, and the assisted-drafting pipeline.

pub mod assist;
pub mod draft;
pub mod form;
pub mod localize;
pub mod state;
pub mod stepper;
pub mod submissions;
pub mod translate;
pub mod validation;

#[cfg(test)]
mod tests;

pub use assist::{AssistFieldKey, AssistRequest, AssistService};
pub use draft::DraftStore;
pub use form::{ApplicationRef, FormField, StepKey, SubmissionForm, STEPS};
pub use localize::{FieldError, KeyTranslator, LocaleContext, LocalizedResolver, Translator};
pub use state::{normalize_initial_values, ApplicationState};
pub use stepper::{ApplicationMode, ApplicationStepper, SubmitError, SubmitReceipt};
pub use submissions::{
    LocalSubmissionStore, Submission, SubmissionRow, SubmissionStore, SubmissionStoreError,
};
pub use translate::{AutoTranslate, FieldUpdate};
pub use validation::{validate_full, validate_step, ValidationIssue};
