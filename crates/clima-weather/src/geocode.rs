//! Forward geocoding: turn a free-text place name into candidate cities.
//! Uses the Mapbox places API.

use clima_core::GeocodingConfig;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::CityCandidate;

const PLACES_PATH: &str = "/geocoding/v5/mapbox.places";
const USER_AGENT: &str = "Clima/0.1.0";
/// Mapbox rejects larger limits
const MAX_LIMIT: u8 = 10;

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Debug, Deserialize)]
struct PlaceFeature {
    id: String,
    /// `[longitude, latitude]`
    #[serde(default)]
    center: Vec<f64>,
    place_name: Option<String>,
    /// Holds the localized names (`place_name_es`, ...)
    #[serde(flatten)]
    localized: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    access_token: String,
    limit: u8,
    language: String,
}

impl Geocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.api_key.clone().unwrap_or_default(),
            limit: config.limit.min(MAX_LIMIT),
            language: config.language.clone(),
        })
    }

    /// Search for places matching `place`.
    ///
    /// Every failure (transport, timeout, HTTP status, malformed body) and an
    /// empty result all come back as [`WeatherError::NoMatch`].
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, place: &str) -> Result<Vec<CityCandidate>, WeatherError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(WeatherError::NoMatch);
        }

        match self.fetch(place).await {
            Ok(candidates) if !candidates.is_empty() => {
                tracing::info!("Geocoding found {} candidates", candidates.len());
                Ok(candidates)
            }
            Ok(_) => {
                tracing::debug!("Geocoding returned no usable features");
                Err(WeatherError::NoMatch)
            }
            Err(e) => {
                tracing::warn!("Geocoding request failed: {}", e);
                Err(WeatherError::NoMatch)
            }
        }
    }

    async fn fetch(&self, place: &str) -> Result<Vec<CityCandidate>, reqwest::Error> {
        let url = format!(
            "{}{}/{}.json",
            self.base_url,
            PLACES_PATH,
            urlencoding::encode(place)
        );

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", limit.as_str()),
                ("language", self.language.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: PlacesResponse = response.json().await?;

        Ok(body
            .features
            .into_iter()
            .filter_map(|f| self.to_candidate(f))
            .collect())
    }

    fn to_candidate(&self, feature: PlaceFeature) -> Option<CityCandidate> {
        let (lng, lat) = match feature.center.as_slice() {
            [lng, lat, ..] => (*lng, *lat),
            _ => {
                tracing::debug!(id = %feature.id, "Skipping feature without center");
                return None;
            }
        };

        // Prefer the localized name, fall back to the default one
        let localized_key = format!("place_name_{}", self.language);
        let name = feature
            .localized
            .get(&localized_key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or(feature.place_name)
            .filter(|n| !n.is_empty())?;

        Some(CityCandidate {
            id: feature.id,
            name,
            lat,
            lng,
        })
    }
}
