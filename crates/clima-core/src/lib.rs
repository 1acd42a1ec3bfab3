pub mod config;
pub mod error;

pub use config::{Config, GeocodingConfig, StorageConfig, Units, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, StorageError, WeatherError};

use anyhow::Result;

/// Initialize the core application
///
/// Logs go to stderr so they never interleave with the interactive prompts.
/// `RUST_LOG` wins over the default level.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Clima core initialized");
    Ok(())
}
