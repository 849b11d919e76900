mod cli;
mod demo;
mod error;
mod infra;
mod telemetry;

pub use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
