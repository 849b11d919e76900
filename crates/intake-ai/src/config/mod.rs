use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the intake application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub assist: AssistConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let storage_path = env::var("APP_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("intake-store.json"));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let assist = AssistConfig::from_env()?;

        Ok(Self {
            environment,
            storage: StorageConfig { path: storage_path },
            assist,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the local key-value store backing drafts and submissions.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

const DEFAULT_ASSIST_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ASSIST_MODEL: &str = "gpt-4o-mini";

/// Knobs for the remote text-completion capability. A missing credential is
/// not an error: the assist pipeline then runs entirely offline.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub translate_max_tokens: u32,
    pub translate_temperature: f32,
    pub timeout: Duration,
}

impl AssistConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let base_url = env::var("ASSIST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ASSIST_BASE_URL.to_string());

        let model = env::var("ASSIST_MODEL")
            .ok()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_ASSIST_MODEL.to_string());

        let timeout_ms = match env::var("ASSIST_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw })?,
            Err(_) => 10_000,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens: 240,
            temperature: 0.4,
            translate_max_tokens: 220,
            translate_temperature: 0.2,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Credential rendered safe for logs: first seven and last four
    /// characters, or `<none>`.
    pub fn masked_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 11 => {
                let head: String = key.chars().take(7).collect();
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("{head}\u{2026}{tail}")
            }
            Some(_) => "\u{2026}".to_string(),
            None => "<none>".to_string(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ASSIST_TIMEOUT_MS must be a whole number of milliseconds, got '{value}'")]
    InvalidTimeout { value: String },
}
