use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{config::Config, error::StoreError};

/// Installs the global subscriber, writing to a daily rolling file in `config.log_dir`.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init(config: &Config) -> Result<WorkerGuard, StoreError> {
    std::fs::create_dir_all(&config.log_dir)?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, "pegel.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|e| StoreError::Logging(e.to_string()))?;

    info!("Logging to {}", config.log_dir.display());
    Ok(guard)
}
