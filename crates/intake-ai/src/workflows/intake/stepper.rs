//! The stepper state machine orchestrating the multi-step form.
//!
//! Owns the live form values, the active step index, the visible error map,
//! and the submit flow. Forward navigation is gated on the active step's
//! field subset; backward navigation is free; the terminal submit
//! re-validates the whole form before handing the payload to the submission
//! store and clearing the draft.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use super::draft::DraftStore;
use super::form::{ApplicationRef, FormField, StepKey, SubmissionForm, STEPS};
use super::localize::{FieldError, LocaleContext};
use super::submissions::{Submission, SubmissionStore, SubmissionStoreError};

/// Whether this session creates a new submission or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationMode {
    Create,
    Edit,
}

/// Result of a successful terminal submit.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub submission: Submission,
    /// True only for create-mode sessions; edit mode acknowledges the save
    /// in place instead of redirecting.
    pub redirect: bool,
}

/// Error raised by the terminal submit.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submit is only permitted from the final step")]
    NotOnFinalStep,
    #[error("form failed validation")]
    Invalid,
    #[error(transparent)]
    Store(#[from] SubmissionStoreError),
}

/// One intake form session: values, step position, errors, and submit flow.
pub struct ApplicationStepper<S: SubmissionStore> {
    store: Arc<S>,
    drafts: DraftStore,
    locale: LocaleContext,
    app_ref: ApplicationRef,
    mode: ApplicationMode,
    values: SubmissionForm,
    errors: BTreeMap<FormField, FieldError>,
    touched: BTreeSet<FormField>,
    step_index: usize,
    submitted: bool,
    pending_focus: Option<FormField>,
}

impl<S: SubmissionStore> ApplicationStepper<S> {
    /// Start a form session. Any persisted draft for the application is
    /// merged over `initial` (the record under edit) exactly once.
    pub fn new(
        store: Arc<S>,
        drafts: DraftStore,
        locale: LocaleContext,
        app_ref: ApplicationRef,
        initial: Option<SubmissionForm>,
    ) -> Self {
        let mode = match app_ref {
            ApplicationRef::New => ApplicationMode::Create,
            ApplicationRef::Existing(_) => ApplicationMode::Edit,
        };

        let mut values = SubmissionForm::default();
        if let Some(merged) = drafts.hydrate(&app_ref.draft_key(), &values, initial.as_ref()) {
            values = merged;
        }

        let mut stepper = Self {
            store,
            drafts,
            locale,
            app_ref,
            mode,
            values,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            step_index: 0,
            submitted: false,
            pending_focus: None,
        };
        stepper.enter_step();
        stepper
    }

    pub fn mode(&self) -> ApplicationMode {
        self.mode
    }

    pub fn application_ref(&self) -> &ApplicationRef {
        &self.app_ref
    }

    pub fn values(&self) -> &SubmissionForm {
        &self.values
    }

    pub fn current_step(&self) -> StepKey {
        STEPS[self.step_index]
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index >= STEPS.len() - 1
    }

    pub fn errors(&self) -> &BTreeMap<FormField, FieldError> {
        &self.errors
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// The field the UI should move focus to, drained on read.
    pub fn take_focus_request(&mut self) -> Option<FormField> {
        self.pending_focus.take()
    }

    /// Update one field. The full value set is scheduled for a debounced
    /// draft write, and a field already showing an error re-validates
    /// immediately so the message clears as the applicant types.
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        self.values.set_value(field, value);
        self.drafts.persist(&self.app_ref.draft_key(), &self.values);

        if self.errors.contains_key(&field) {
            let resolved = self
                .locale
                .resolver()
                .resolve_fields(&[field], &self.values);
            match resolved.get(&field) {
                Some(error) => {
                    self.errors.insert(field, error.clone());
                }
                None => {
                    self.errors.remove(&field);
                }
            }
        }
    }

    /// Validate the active step's field subset. On failure the step's
    /// fields are marked touched and focus is requested on the first
    /// failing field.
    pub fn validate_current_step(&mut self) -> bool {
        let step = self.current_step();
        let resolved = self.locale.resolver().resolve_step(step, &self.values);
        if resolved.is_empty() {
            for field in step.fields() {
                self.errors.remove(field);
            }
            return true;
        }

        self.touched.extend(step.fields().iter().copied());
        self.pending_focus = step
            .fields()
            .iter()
            .copied()
            .find(|field| resolved.contains_key(field));
        for field in step.fields() {
            match resolved.get(field) {
                Some(error) => {
                    self.errors.insert(*field, error.clone());
                }
                None => {
                    self.errors.remove(field);
                }
            }
        }
        false
    }

    /// Advance to the next step when the active step validates.
    pub fn next(&mut self) -> bool {
        if !self.validate_current_step() {
            return false;
        }
        if self.is_last_step() {
            return false;
        }
        self.step_index += 1;
        self.enter_step();
        debug!(step = self.current_step().label(), "advanced to step");
        true
    }

    /// Go back one step; never validates.
    pub fn prev(&mut self) {
        if self.step_index > 0 {
            self.step_index -= 1;
            self.enter_step();
        }
    }

    /// Jump to an arbitrary step (e.g. from the URL), clamped to range.
    pub fn go_to_step(&mut self, index: usize) {
        let clamped = index.min(STEPS.len() - 1);
        if clamped != self.step_index {
            self.step_index = clamped;
            self.enter_step();
        }
    }

    /// Swap the locale context. When errors are visible or a submit was
    /// already attempted, validation re-runs silently so the error copy
    /// follows the new language; focus is not forced.
    pub fn set_locale(&mut self, locale: LocaleContext) {
        self.locale = locale;
        if self.errors.is_empty() && !self.submitted {
            return;
        }
        self.errors = self.locale.resolver().resolve_full(&self.values);
    }

    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    /// Terminal submit, permitted only from the last step. Re-validates the
    /// entire form, persists through the submission store, and clears the
    /// draft. The receipt's `redirect` flag is set only in create mode.
    pub fn submit(&mut self) -> Result<SubmitReceipt, SubmitError> {
        self.submitted = true;

        if !self.is_last_step() {
            return Err(SubmitError::NotOnFinalStep);
        }

        let resolved = self.locale.resolver().resolve_full(&self.values);
        if !resolved.is_empty() {
            self.touched.extend(resolved.keys().copied());
            self.pending_focus = resolved.keys().next().copied();
            self.errors = resolved;
            return Err(SubmitError::Invalid);
        }
        self.errors.clear();

        let submission = match &self.app_ref {
            ApplicationRef::New => self.store.create(self.values.clone())?,
            ApplicationRef::Existing(id) => self.store.update(id, self.values.clone())?,
        };

        self.drafts.clear(&self.app_ref.draft_key());
        info!(id = %submission.id, mode = ?self.mode, "application submitted");

        Ok(SubmitReceipt {
            submission,
            redirect: matches!(self.mode, ApplicationMode::Create),
        })
    }

    /// Step-entry side effects: errors belonging to other steps are cleared
    /// so they never leak into view, and focus moves to the step's first
    /// field.
    fn enter_step(&mut self) {
        let step = self.current_step();
        self.errors.retain(|field, _| step.fields().contains(field));
        self.pending_focus = step.fields().first().copied();
    }
}
