//! Two-stage assist strategy: one remote attempt, then the deterministic
//! offline result. Neither `generate` nor `translate` can fail from the
//! caller's point of view.

use tracing::debug;

use super::client::{ChatMessage, ChatRequest, CompletionClient, OpenAiClient};
use super::prompts::{
    build_generate_prompt, build_offline_template, build_refine_prompt, system_prompt,
    system_translate_prompt, user_translate_prompt,
};
use super::AssistRequest;
use crate::config::AssistConfig;
use crate::language::SupportedLang;

const SEED_LIMIT_CHARS: usize = 900;
const ELLIPSIS: &str = "...";

/// Assisted-drafting service. Generic over the completion client so tests
/// can swap in scripted doubles; `None` means no credential is configured
/// and the service runs entirely offline.
pub struct AssistService<C: CompletionClient = OpenAiClient> {
    client: Option<C>,
    config: AssistConfig,
}

impl AssistService<OpenAiClient> {
    pub fn from_config(config: AssistConfig) -> Self {
        let client = OpenAiClient::from_config(&config);
        Self { client, config }
    }
}

impl<C: CompletionClient> AssistService<C> {
    pub fn with_client(config: AssistConfig, client: Option<C>) -> Self {
        Self { client, config }
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    /// Produce a draft for one narrative field. A single remote attempt with
    /// the configured timeout; any error or empty result yields the offline
    /// fallback instead. The returned text is always trimmed.
    pub async fn generate(&self, request: &AssistRequest) -> String {
        let Some(client) = &self.client else {
            return self.offline(request);
        };

        let prompt = match request.seed() {
            Some(seed) => build_refine_prompt(request, seed),
            None => build_generate_prompt(request),
        };

        let chat = ChatRequest {
            messages: vec![
                ChatMessage::system(system_prompt(request.language)),
                ChatMessage::user(prompt),
            ],
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        match client.complete(chat).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => self.offline(request),
            Err(err) => {
                debug!(field = ?request.field_key, error = %err, "assist completion failed; using offline result");
                self.offline(request)
            }
        }
    }

    /// Translate free text into the target language. Pass-through on empty
    /// input, missing credentials, or any remote failure.
    pub async fn translate(&self, text: &str, target: SupportedLang) -> String {
        let normalized = text.trim();
        if normalized.is_empty() {
            return text.to_string();
        }
        let Some(client) = &self.client else {
            return text.to_string();
        };

        let chat = ChatRequest {
            messages: vec![
                ChatMessage::system(system_translate_prompt(target)),
                ChatMessage::user(user_translate_prompt(normalized, target)),
            ],
            model: self.config.model.clone(),
            max_tokens: self.config.translate_max_tokens,
            temperature: self.config.translate_temperature,
        };

        match client.complete(chat).await {
            Ok(output) if !output.trim().is_empty() => output.trim().to_string(),
            Ok(_) => text.to_string(),
            Err(err) => {
                debug!(error = %err, "translation failed; keeping original text");
                text.to_string()
            }
        }
    }

    /// Deterministic non-network result: the whitespace-normalized seed
    /// hard-truncated at 900 characters, or the fixed per-field template.
    pub fn offline(&self, request: &AssistRequest) -> String {
        match request.seed() {
            Some(seed) => clip_seed(seed),
            None => build_offline_template(request),
        }
    }
}

fn clip_seed(seed: &str) -> String {
    let normalized = seed.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() > SEED_LIMIT_CHARS {
        let clipped: String = chars[..SEED_LIMIT_CHARS].iter().collect();
        format!("{clipped}{ELLIPSIS}")
    } else {
        normalized
    }
}
