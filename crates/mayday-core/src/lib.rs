pub mod config;
pub mod error;

pub use config::{CalendarConfig, CompletionConfig, Config, ScheduleConfig, ValidationResult};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize the core application
///
/// Logs go to stderr so schedule listings on stdout stay clean. `RUST_LOG`
/// overrides the default filter.
pub fn init(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Mayday core initialized");
    Ok(())
}
