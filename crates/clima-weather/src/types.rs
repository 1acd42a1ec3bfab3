use serde::{Deserialize, Serialize};

/// A place returned by geocoding, offered to the user for disambiguation.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCandidate {
    /// Provider-assigned identifier, the history key
    pub id: String,
    /// Localized display name
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Current conditions for one place.
///
/// Field names on disk follow the history file layout (`desc`, `tempMax`,
/// `sensacionTermica`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "desc")]
    pub description: String,
    pub temp: f64,
    #[serde(rename = "tempMax")]
    pub temp_max: f64,
    #[serde(rename = "tempMin")]
    pub temp_min: f64,
    #[serde(rename = "sensacionTermica")]
    pub feels_like: f64,
}

/// One persisted search: a city and its last known weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "clima")]
    pub weather: WeatherSnapshot,
}

impl HistoryRecord {
    pub fn new(city: &CityCandidate, weather: WeatherSnapshot) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            weather,
        }
    }
}

/// Outcome of a disambiguation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The reserved `0` option: abort without side effects
    Cancel,
    /// The id of the chosen entry
    City(String),
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_history_record_wire_names() {
        let record = HistoryRecord {
            id: "place.1".to_string(),
            name: "Madrid, España".to_string(),
            weather: WeatherSnapshot {
                description: "cielo claro".to_string(),
                temp: 21.5,
                temp_max: 23.0,
                temp_min: 19.0,
                feels_like: 20.75,
            },
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["nombre"], "Madrid, España");
        assert_eq!(json["clima"]["desc"], "cielo claro");
        assert_eq!(json["clima"]["tempMax"], 23.0);
        assert_eq!(json["clima"]["tempMin"], 19.0);
        assert_eq!(json["clima"]["sensacionTermica"], 20.75);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_history_record_from_candidate() {
        let city = CityCandidate {
            id: "place.9".to_string(),
            name: "Lima, Perú".to_string(),
            lat: -12.04,
            lng: -77.03,
        };
        let weather = WeatherSnapshot {
            description: "niebla".to_string(),
            temp: 17.0,
            temp_max: 18.0,
            temp_min: 16.0,
            feels_like: 16.5,
        };

        let record = HistoryRecord::new(&city, weather.clone());
        assert_eq!(record.id, "place.9");
        assert_eq!(record.name, "Lima, Perú");
        assert_eq!(record.weather, weather);
    }
}
