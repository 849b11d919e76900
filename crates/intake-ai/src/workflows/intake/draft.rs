//! Best-effort draft persistence for in-progress form values.
//!
//! Drafts are written debounced while the applicant types and merged back
//! exactly once when a form session starts. Storage is advisory: every
//! read/write failure is swallowed so the form keeps working in memory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use super::form::SubmissionForm;
use crate::storage::KeyValueStore;

const SETTLE: Duration = Duration::from_millis(300);

/// Debounced draft store for one form session.
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
    settle: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    hydrated: AtomicBool,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_settle(store, SETTLE)
    }

    pub fn with_settle(store: Arc<dyn KeyValueStore>, settle: Duration) -> Self {
        Self {
            store,
            settle,
            pending: Mutex::new(None),
            hydrated: AtomicBool::new(false),
        }
    }

    /// Merge persisted draft values over the session's starting values, once
    /// per store instance. Merge precedence, lowest first: the live values
    /// (form defaults), the record being edited, the persisted draft.
    /// Returns `None` when this session already hydrated or there is nothing
    /// to merge.
    pub fn hydrate(
        &self,
        key: &str,
        current: &SubmissionForm,
        initial: Option<&SubmissionForm>,
    ) -> Option<SubmissionForm> {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            return None;
        }

        let draft = self.read_draft(key);
        if draft.is_none() && initial.is_none() {
            return None;
        }

        let base = initial.unwrap_or(current);
        let mut merged = serde_json::to_value(base).ok()?;
        if let (Value::Object(target), Some(Value::Object(overlay))) = (&mut merged, draft) {
            for (field, value) in overlay {
                target.insert(field, value);
            }
        }
        serde_json::from_value(merged).ok()
    }

    /// Schedule a write of the complete current value set. Rapid successive
    /// calls collapse into one write of the final state after the settle
    /// window; the draft key always holds a full form snapshot.
    pub fn persist(&self, key: &str, values: &SubmissionForm) {
        let payload = match serde_json::to_string(values) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(%key, error = %err, "draft serialization failed; skipping persist");
                return;
            }
        };

        let store = Arc::clone(&self.store);
        let key = key.to_string();
        let settle = self.settle;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            if let Err(err) = store.set(&key, &payload) {
                debug!(%key, error = %err, "draft write failed; continuing in-memory");
            }
        });

        let mut pending = self.pending.lock().expect("draft mutex poisoned");
        if let Some(stale) = pending.replace(handle) {
            stale.abort();
        }
    }

    /// Remove the persisted draft. Safe to call repeatedly; a pending
    /// debounced write is cancelled so it cannot resurrect the draft.
    pub fn clear(&self, key: &str) {
        if let Some(stale) = self.pending.lock().expect("draft mutex poisoned").take() {
            stale.abort();
        }
        if let Err(err) = self.store.remove(key) {
            debug!(%key, error = %err, "draft removal failed");
        }
    }

    fn read_draft(&self, key: &str) -> Option<Value> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                debug!(%key, error = %err, "draft read failed; starting clean");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value @ Value::Object(_)) => Some(value),
            Ok(_) | Err(_) => {
                debug!(%key, "draft payload malformed; ignoring");
                None
            }
        }
    }
}
