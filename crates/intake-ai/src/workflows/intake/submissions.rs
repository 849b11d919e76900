//! Submitted application records and their local persistence.
//!
//! The submissions list lives as one JSON array under a fixed storage key.
//! Records keep their `submittedAt` for life; edits rewrite the form values
//! and bump `updatedAt` only.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::form::SubmissionForm;
use crate::storage::{KeyValueStore, StoreError};

/// Storage key of the submissions array.
pub const SUBMISSIONS_KEY: &str = "submissions";

const REASON_EXCERPT_CHARS: usize = 50;
const ID_TAIL_CHARS: usize = 6;

/// A submitted application: the form values plus identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    #[serde(flatten)]
    pub form: SubmissionForm,
    /// Creation timestamp, immutable after the first successful submit.
    pub submitted_at: String,
    pub updated_at: String,
}

/// List-view projection of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: String,
    pub id_tail: String,
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub reason_short: String,
    pub submitted_at_fmt: String,
}

impl Submission {
    pub fn to_row(&self) -> SubmissionRow {
        let reason: Vec<char> = self.form.reason_for_applying.chars().collect();
        let excerpt: String = reason.iter().take(REASON_EXCERPT_CHARS).collect();
        let overflow = reason.len() > REASON_EXCERPT_CHARS;

        let tail: String = self
            .id
            .chars()
            .rev()
            .take(ID_TAIL_CHARS)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        SubmissionRow {
            id: self.id.clone(),
            id_tail: format!("#{tail}"),
            name: self.form.name.clone(),
            national_id: self.form.national_id.clone(),
            email: self.form.email.clone(),
            reason_short: if overflow {
                format!("{excerpt}...")
            } else {
                excerpt
            },
            submitted_at_fmt: format_submitted_at(&self.submitted_at),
        }
    }
}

fn format_submitted_at(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => parsed.format("%b %-d, %Y %H:%M").to_string(),
        Err(_) => "-".to_string(),
    }
}

/// Error enumeration for submission persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionStoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("submission not found: {id}")]
    NotFound { id: String },
}

/// Persistence seam for the submissions list so the stepper can be
/// exercised against an in-memory double.
pub trait SubmissionStore: Send + Sync {
    fn list(&self) -> Result<Vec<Submission>, SubmissionStoreError>;
    fn get(&self, id: &str) -> Result<Option<Submission>, SubmissionStoreError>;
    fn create(&self, form: SubmissionForm) -> Result<Submission, SubmissionStoreError>;
    fn update(&self, id: &str, form: SubmissionForm) -> Result<Submission, SubmissionStoreError>;
    fn remove(&self, id: &str) -> Result<(), SubmissionStoreError>;
}

/// Submission store layered over the local key-value store.
pub struct LocalSubmissionStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> LocalSubmissionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn read(&self) -> Result<Vec<Submission>, SubmissionStoreError> {
        match self.kv.get(SUBMISSIONS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw).map_err(StoreError::from)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, list: &[Submission]) -> Result<(), SubmissionStoreError> {
        let raw = serde_json::to_string(list).map_err(StoreError::from)?;
        self.kv.set(SUBMISSIONS_KEY, &raw)?;
        Ok(())
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Millisecond-timestamp id; bumped until unique within the current list,
/// since two creates can land in the same millisecond here.
fn next_id(existing: &[Submission]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while existing.iter().any(|s| s.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

impl<K: KeyValueStore> SubmissionStore for LocalSubmissionStore<K> {
    fn list(&self) -> Result<Vec<Submission>, SubmissionStoreError> {
        self.read()
    }

    fn get(&self, id: &str) -> Result<Option<Submission>, SubmissionStoreError> {
        Ok(self.read()?.into_iter().find(|s| s.id == id))
    }

    fn create(&self, form: SubmissionForm) -> Result<Submission, SubmissionStoreError> {
        let mut list = self.read()?;
        let now = now_iso();
        let submission = Submission {
            id: next_id(&list),
            form,
            submitted_at: now.clone(),
            updated_at: now,
        };
        list.push(submission.clone());
        self.write(&list)?;
        info!(id = %submission.id, "submission created");
        Ok(submission)
    }

    fn update(&self, id: &str, form: SubmissionForm) -> Result<Submission, SubmissionStoreError> {
        let mut list = self.read()?;
        let slot = list.iter_mut().find(|s| s.id == id).ok_or_else(|| {
            SubmissionStoreError::NotFound { id: id.to_string() }
        })?;
        slot.form = form;
        slot.updated_at = now_iso();
        let updated = slot.clone();
        self.write(&list)?;
        info!(id = %updated.id, "submission updated");
        Ok(updated)
    }

    fn remove(&self, id: &str) -> Result<(), SubmissionStoreError> {
        let mut list = self.read()?;
        list.retain(|s| s.id != id);
        self.write(&list)
    }
}
