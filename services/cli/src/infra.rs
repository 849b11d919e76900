use std::sync::Arc;

use intake_ai::config::AppConfig;
use intake_ai::storage::JsonFileStore;
use intake_ai::workflows::intake::assist::OpenAiClient;
use intake_ai::workflows::intake::{AssistService, LocalSubmissionStore};

pub(crate) type FileSubmissionStore = LocalSubmissionStore<Arc<JsonFileStore>>;

/// Shared key-value file plus the stores layered over it.
pub(crate) struct Infra {
    pub(crate) kv: Arc<JsonFileStore>,
    pub(crate) submissions: Arc<FileSubmissionStore>,
    pub(crate) assist: Arc<AssistService<OpenAiClient>>,
}

pub(crate) fn build(config: &AppConfig) -> Infra {
    let kv = Arc::new(JsonFileStore::new(config.storage.path.clone()));
    let submissions = Arc::new(LocalSubmissionStore::new(Arc::clone(&kv)));
    let assist = Arc::new(AssistService::from_config(config.assist.clone()));
    Infra {
        kv,
        submissions,
        assist,
    }
}
