//! Weather lookup for Clima
//!
//! Finds cities through the Mapbox places API, fetches current conditions
//! from OpenWeather and keeps a persistent, deduplicated search history.

pub mod error;
mod error_mapping;
pub mod geocode;
pub mod history;
pub mod lookup;
pub mod provider;
pub mod types;

pub use error::{HistoryError, LoadError, WeatherError, NO_MATCH_MESSAGE};
pub use geocode::Geocoder;
pub use history::{read_history, HistoryStore, RECENT_WINDOW};
pub use lookup::{LookupResult, WeatherLookup};
pub use provider::WeatherProvider;
pub use types::*;
