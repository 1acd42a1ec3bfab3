use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the Mapbox access token.
pub const MAPBOX_KEY_VAR: &str = "MAPBOX_KEY";
/// Environment variable holding the OpenWeather API key.
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Places lookup (Mapbox geocoding)
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Current weather (OpenWeather)
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Search history file
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the Mapbox API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Mapbox access token. Read from `MAPBOX_KEY`, never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum number of candidate cities per search
    #[serde(default = "default_geocoding_limit")]
    pub limit: u8,

    /// Language of the returned place names
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_geocoding_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_geocoding_base_url() -> String {
    "https://api.mapbox.com".to_string()
}

fn default_geocoding_limit() -> u8 {
    5
}

fn default_language() -> String {
    "es".to_string()
}

fn default_geocoding_timeout_ms() -> u64 {
    3000
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            limit: default_geocoding_limit(),
            language: default_language(),
            timeout_ms: default_geocoding_timeout_ms(),
        }
    }
}

/// Measurement system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the provider's `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    /// Suffix printed after a temperature
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the OpenWeather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeather API key. Read from `OPENWEATHER_KEY`, never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Units requested from the provider. History entries store bare numbers,
    /// so they are always shown with the symbol of the current setting.
    #[serde(default)]
    pub units: Units,

    /// Language of the weather description
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_weather_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_weather_timeout_ms() -> u64 {
    5000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            units: Units::default(),
            language: default_language(),
            timeout_ms: default_weather_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the search history, relative to the working directory
    pub history_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("db").join("basededatos.json"),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating a default
    /// file if it doesn't exist. API keys are then taken from the environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let mut config = Self::default();
            config.save_to(&config_path)?;
            config.apply_env();
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, then apply the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env();

        Ok(config)
    }

    /// Parse configuration from TOML text without consulting the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Validate a loaded configuration, after any command-line overrides
    ///
    /// Returns the config along with any validation warnings, which are also
    /// logged. Returns an error if validation fails with critical errors.
    pub fn validated(self) -> Result<(Self, ValidationResult)> {
        let validation = self.validate();

        if !validation.is_valid() {
            let missing_keys = validation
                .errors
                .iter()
                .all(|e| e.field.ends_with(".api_key"));
            let err = if missing_keys {
                ConfigError::MissingSetting(validation.error_summary())
            } else {
                ConfigError::Invalid(validation.error_summary())
            };
            return Err(err.into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Override API keys from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Override API keys using the given variable lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(MAPBOX_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.geocoding.api_key = Some(key);
        }
        if let Some(key) = lookup(OPENWEATHER_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key);
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // API keys
        if !has_value(&self.geocoding.api_key) {
            result.add_error(
                "geocoding.api_key",
                format!("Mapbox access token missing; set {}", MAPBOX_KEY_VAR),
            );
        }
        if !has_value(&self.weather.api_key) {
            result.add_error(
                "weather.api_key",
                format!("OpenWeather API key missing; set {}", OPENWEATHER_KEY_VAR),
            );
        }

        self.validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);
        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        // Result limit
        if self.geocoding.limit == 0 {
            result.add_error("geocoding.limit", "Limit must be greater than 0");
        } else if self.geocoding.limit > 10 {
            result.add_warning(
                "geocoding.limit",
                "Mapbox returns at most 10 results; the limit will be capped",
            );
        }

        // Languages
        if self.geocoding.language.trim().is_empty() {
            result.add_error("geocoding.language", "Language must not be empty");
        }
        if self.weather.language.trim().is_empty() {
            result.add_error("weather.language", "Language must not be empty");
        }

        // Timeouts
        for (field, timeout_ms) in [
            ("geocoding.timeout_ms", self.geocoding.timeout_ms),
            ("weather.timeout_ms", self.weather.timeout_ms),
        ] {
            if timeout_ms == 0 {
                result.add_error(field, "Timeout must be greater than 0");
            } else if timeout_ms > 60_000 {
                result.add_warning(field, "Timeout is more than a minute");
            }
        }

        // History file
        if self.storage.history_path.as_os_str().is_empty() {
            result.add_error("storage.history_path", "History path must not be empty");
        } else if self.storage.history_path.is_dir() {
            result.add_error(
                "storage.history_path",
                format!(
                    "Path is a directory: {}",
                    self.storage.history_path.display()
                ),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the given file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("clima");

        Ok(config_dir.join("config.toml"))
    }
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
