//! Centralized error types for the Clima application.
//!
//! This module provides a typed error hierarchy that:
//! - Keeps the lookup failures distinguishable for the session loop
//! - Gives startup configuration failures a user-friendly message
//! - Preserves the provider's own wording where it must be shown as-is

use thiserror::Error;

/// Top-level application error type.
///
/// Weather and storage errors are transparent: their display text is exactly
/// what the lower layer produced.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => {
                "A required setting is missing. Set MAPBOX_KEY and OPENWEATHER_KEY."
            }
        }
    }
}

/// Search history persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot store search: {message} (kind: {kind})")]
    StoreFailed { message: String, kind: String },
}

/// Weather lookup errors as seen by the session loop.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Every geocoding failure collapses into this one message.
    #[error("No matching city found, try again!")]
    NoMatch,

    #[error("Unknown selection: {0}")]
    UnknownSelection(String),

    /// Weather provider failure, worded exactly as the provider layer reported it.
    #[error("{0}")]
    Provider(String),
}
