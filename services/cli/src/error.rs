use intake_ai::config::ConfigError;
use intake_ai::workflows::intake::{SubmissionStoreError, SubmitError};

use crate::telemetry::TelemetryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("submission store error: {0}")]
    Store(#[from] SubmissionStoreError),
    #[error("submit error: {0}")]
    Submit(#[from] SubmitError),
}
