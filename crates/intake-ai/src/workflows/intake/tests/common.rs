use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::AssistConfig;
use crate::language::SupportedLang;
use crate::storage::{KeyValueStore, MemoryKeyValueStore, StoreError};
use crate::workflows::intake::assist::{
    AssistFieldKey, AssistRequest, AssistService, ChatRequest, CompletionClient, CompletionError,
};
use crate::workflows::intake::draft::DraftStore;
use crate::workflows::intake::form::{ApplicationRef, SubmissionForm};
use crate::workflows::intake::localize::{KeyTranslator, LocaleContext};
use crate::workflows::intake::state::ApplicationState;
use crate::workflows::intake::stepper::ApplicationStepper;
use crate::workflows::intake::submissions::LocalSubmissionStore;

pub(super) fn valid_form() -> SubmissionForm {
    SubmissionForm {
        name: "Layla Hassan".to_string(),
        national_id: "784-1990-1234567".to_string(),
        date_of_birth: "1990-04-12".to_string(),
        gender: "female".to_string(),
        address: "12 Corniche Road, Apt 4".to_string(),
        city: "Abu Dhabi".to_string(),
        state: "Abu Dhabi".to_string(),
        country: "United Arab Emirates".to_string(),
        phone: "+971 50 123 4567".to_string(),
        email: "layla.hassan@example.com".to_string(),
        marital_status: "married".to_string(),
        dependents: "2".to_string(),
        employment_status: "unemployed".to_string(),
        monthly_income: "500".to_string(),
        housing_status: "rented".to_string(),
        financial_situation: "Income no longer covers our rent and utilities.".to_string(),
        employment_circumstance: "I was laid off two months ago and am job hunting.".to_string(),
        reason_for_applying: "Temporary support until my income stabilizes.".to_string(),
    }
}

pub(super) fn locale() -> LocaleContext {
    LocaleContext::new(SupportedLang::En, Arc::new(KeyTranslator))
}

pub(super) fn assist_config() -> AssistConfig {
    AssistConfig {
        api_key: None,
        base_url: "https://api.openai.com/v1".to_string(),
        model: "gpt-4o-mini".to_string(),
        max_tokens: 240,
        temperature: 0.4,
        translate_max_tokens: 220,
        translate_temperature: 0.2,
        timeout: Duration::from_secs(10),
    }
}

/// Assist service with no credential: every call takes the offline path.
pub(super) fn offline_assist() -> AssistService<ScriptedClient> {
    AssistService::with_client(assist_config(), None)
}

pub(super) fn online_assist(client: ScriptedClient) -> AssistService<ScriptedClient> {
    AssistService::with_client(assist_config(), Some(client))
}

pub(super) fn generate_request(
    field_key: AssistFieldKey,
    language: SupportedLang,
) -> AssistRequest {
    AssistRequest::generate(field_key, ApplicationState::from_form(&valid_form()), language)
}

pub(super) fn build_stepper(
    app_ref: ApplicationRef,
    initial: Option<SubmissionForm>,
) -> (
    ApplicationStepper<LocalSubmissionStore<Arc<MemoryKeyValueStore>>>,
    Arc<MemoryKeyValueStore>,
) {
    let kv = Arc::new(MemoryKeyValueStore::default());
    let store = Arc::new(LocalSubmissionStore::new(Arc::clone(&kv)));
    let drafts = DraftStore::new(Arc::clone(&kv) as Arc<dyn KeyValueStore>);
    let stepper = ApplicationStepper::new(store, drafts, locale(), app_ref, initial);
    (stepper, kv)
}

/// Completion double replaying a fixed script of results.
#[derive(Default)]
pub(super) struct ScriptedClient {
    responses: Mutex<Vec<Result<String, CompletionError>>>,
    pub(super) requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub(super) fn replying(text: &str) -> Self {
        let client = Self::default();
        client
            .responses
            .lock()
            .expect("script mutex poisoned")
            .push(Ok(text.to_string()));
        client
    }

    pub(super) fn failing() -> Self {
        let client = Self::default();
        client
            .responses
            .lock()
            .expect("script mutex poisoned")
            .push(Err(CompletionError::Status {
                status: 503,
                body: "overloaded".to_string(),
            }));
        client
    }

    pub(super) fn push(&self, response: Result<String, CompletionError>) {
        self.responses
            .lock()
            .expect("script mutex poisoned")
            .push(response);
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request);
        let mut responses = self.responses.lock().expect("script mutex poisoned");
        if responses.is_empty() {
            return Err(CompletionError::Empty);
        }
        responses.remove(0)
    }
}

/// Key-value store double counting writes per key.
#[derive(Default)]
pub(super) struct CountingStore {
    inner: MemoryKeyValueStore,
    pub(super) writes: Mutex<Vec<String>>,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes
            .lock()
            .expect("write log mutex poisoned")
            .push(key.to_string());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

/// Key-value store double where every operation fails.
pub(super) struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("storage disabled")))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("quota exceeded")))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("storage disabled")))
    }
}
