//! Current conditions from the OpenWeather API.

use clima_core::{Units, WeatherConfig};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::WeatherSnapshot;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    feels_like: f64,
}

/// Error body returned with non-2xx statuses (`{"cod": 401, "message": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: Units,
    language: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            units: config.units,
            language: config.language.clone(),
        })
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Fetch current conditions at the given coordinates.
    ///
    /// Errors are returned as the provider reported them.
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.as_query().to_string()),
                ("lang", self.language.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            tracing::debug!("Weather request returned status {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CurrentResponse =
            serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("response has no weather entries".to_string()))?;

        Ok(WeatherSnapshot {
            description: condition.description,
            temp: body.main.temp,
            temp_max: body.main.temp_max,
            temp_min: body.main.temp_min,
            feels_like: body.main.feels_like,
        })
    }
}
