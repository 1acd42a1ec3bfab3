//! Search orchestration: geocode, let the caller choose, fetch weather,
//! record the result.

use clima_core::{Config, Units};
use tracing::instrument;

use crate::error::WeatherError;
use crate::geocode::Geocoder;
use crate::history::HistoryStore;
use crate::provider::WeatherProvider;
use crate::types::{CityCandidate, HistoryRecord, Selection, WeatherSnapshot};

/// A completed lookup, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub city: CityCandidate,
    pub weather: WeatherSnapshot,
}

pub struct WeatherLookup {
    geocoder: Geocoder,
    provider: WeatherProvider,
    history: HistoryStore,
}

impl WeatherLookup {
    /// Build the clients from `config` and load the search history.
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let geocoder = Geocoder::new(&config.geocoding)?;
        let provider = WeatherProvider::new(&config.weather)?;
        let history = HistoryStore::open(config.storage.history_path.clone());

        Ok(Self::with_parts(geocoder, provider, history))
    }

    pub fn with_parts(geocoder: Geocoder, provider: WeatherProvider, history: HistoryStore) -> Self {
        Self {
            geocoder,
            provider,
            history,
        }
    }

    /// Candidate cities for a free-text name.
    pub async fn find_cities(&self, name: &str) -> Result<Vec<CityCandidate>, WeatherError> {
        self.geocoder.search(name).await
    }

    /// Act on the user's choice among `candidates`.
    ///
    /// `Selection::Cancel` returns `Ok(None)` without touching the network or
    /// the history.
    #[instrument(skip(self, candidates), level = "info")]
    pub async fn resolve(
        &mut self,
        candidates: &[CityCandidate],
        selection: &Selection,
    ) -> Result<Option<LookupResult>, WeatherError> {
        let id = match selection {
            Selection::Cancel => {
                tracing::debug!("Search cancelled");
                return Ok(None);
            }
            Selection::City(id) => id,
        };

        let city = candidates
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| WeatherError::UnknownSelection(id.clone()))?;

        let weather = self.provider.current(city.lat, city.lng).await?;
        self.history.record_search(&city, weather.clone())?;

        Ok(Some(LookupResult { city, weather }))
    }

    /// The recent window of the search history.
    pub fn recent_history(&self) -> &[HistoryRecord] {
        self.history.recent_history()
    }

    /// A record from the recent window, chosen from the history menu.
    pub fn history_entry(&self, selection: &Selection) -> Result<Option<&HistoryRecord>, WeatherError> {
        match selection {
            Selection::Cancel => Ok(None),
            Selection::City(id) => self
                .recent_history()
                .iter()
                .find(|r| &r.id == id)
                .map(Some)
                .ok_or_else(|| WeatherError::UnknownSelection(id.clone())),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Units the temperatures are reported in.
    pub fn units(&self) -> Units {
        self.provider.units()
    }
}
