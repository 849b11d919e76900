//! Silent re-translation of the narrative fields when the language changes.
//!
//! The pass runs sequentially over the three fields so ordering stays
//! deterministic and cancellation is clean: each run carries an epoch, and
//! a newer run (or an explicit cancel) invalidates everything still in
//! flight — a stale run returns no updates at all.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::assist::{AssistFieldKey, AssistService, CompletionClient};
use super::form::{FormField, SubmissionForm};
use crate::language::{needs_translation, SupportedLang};

/// Replacement text for one narrative field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: FormField,
    pub text: String,
}

/// Language-switch translation pass over the narrative fields.
pub struct AutoTranslate<C: CompletionClient> {
    assist: Arc<AssistService<C>>,
    epoch: AtomicU64,
    translating: AtomicBool,
    first_run: AtomicBool,
}

impl<C: CompletionClient> AutoTranslate<C> {
    pub fn new(assist: Arc<AssistService<C>>) -> Self {
        Self {
            assist,
            epoch: AtomicU64::new(0),
            translating: AtomicBool::new(false),
            first_run: AtomicBool::new(true),
        }
    }

    /// Whether a pass is currently in flight; the UI gates the fields on it.
    pub fn translating(&self) -> bool {
        self.translating.load(Ordering::SeqCst)
    }

    /// Invalidate any in-flight pass, e.g. when the owning surface closes.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.translating.store(false, Ordering::SeqCst);
    }

    /// React to a language change. The very first call (initial mount) is a
    /// no-op. Fields whose script already matches the target are skipped;
    /// the rest are translated one at a time. Returns the replacements the
    /// caller should apply — empty when nothing changed or the run went
    /// stale mid-flight.
    pub async fn on_language_change(
        &self,
        form: &SubmissionForm,
        target: SupportedLang,
    ) -> Vec<FieldUpdate> {
        if self.first_run.swap(false, Ordering::SeqCst) {
            return Vec::new();
        }

        let run = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.translating.store(true, Ordering::SeqCst);

        let mut updates = Vec::new();
        for key in AssistFieldKey::ALL {
            let field = key.target_field();
            let current = form.value(field);
            if !needs_translation(current, target) {
                continue;
            }

            let translated = self.assist.translate(current, target).await;

            if self.epoch.load(Ordering::SeqCst) != run {
                debug!(?field, "translation pass superseded; discarding results");
                return Vec::new();
            }

            if !translated.is_empty() && translated != current {
                updates.push(FieldUpdate {
                    field,
                    text: translated,
                });
            }
        }

        self.translating.store(false, Ordering::SeqCst);
        updates
    }
}
