//! Integration tests for WeatherLookup using wiremock.
//!
//! Both providers are served by one mock server; the history lives in a
//! temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use clima_core::{Config, Units};
use clima_weather::{read_history, Selection, WeatherError, WeatherLookup, NO_MATCH_MESSAGE};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.geocoding.base_url = server.uri();
    config.geocoding.api_key = Some("pk.test".to_string());
    config.weather.base_url = server.uri();
    config.weather.api_key = Some("ow-test".to_string());
    config.storage.history_path = dir.path().join("db").join("basededatos.json");
    config
}

/// Helper to create a geocoding response
fn places(features: &[(&str, &str, f64, f64)]) -> serde_json::Value {
    let features: Vec<_> = features
        .iter()
        .map(|(id, name, lng, lat)| {
            serde_json::json!({
                "id": id,
                "place_name": name,
                "place_name_es": name,
                "center": [lng, lat]
            })
        })
        .collect();
    serde_json::json!({ "type": "FeatureCollection", "features": features })
}

fn current_weather(description: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "description": description }],
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "temp_min": temp - 2.0,
            "temp_max": temp + 2.0
        }
    })
}

async fn mount_places(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/geocoding/v5/mapbox.places/{}.json", query)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_select_and_record() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    mount_places(
        &server,
        "Lima",
        places(&[
            ("place.1", "Lima, Perú", -77.03, -12.04),
            ("place.2", "Lima, Ohio, Estados Unidos", -84.1, 40.74),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "40.74"))
        .and(query_param("lon", "-84.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("nubes", 12.0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut lookup = WeatherLookup::new(&config).unwrap();
    let candidates = lookup.find_cities("Lima").await.unwrap();
    assert_eq!(candidates.len(), 2);

    let result = lookup
        .resolve(&candidates, &Selection::City("place.2".to_string()))
        .await
        .unwrap()
        .expect("a city was selected");

    assert_eq!(result.city.name, "Lima, Ohio, Estados Unidos");
    assert_eq!(result.weather.description, "nubes");
    assert_eq!(result.weather.temp_max, 14.0);

    let recent = lookup.recent_history();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, "place.2");

    // Flushed to disk right away
    let on_disk = read_history(&config.storage.history_path).unwrap();
    assert_eq!(on_disk, lookup.history().records());
}

#[tokio::test]
async fn test_cancel_has_no_side_effects() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    mount_places(&server, "Quito", places(&[("place.3", "Quito, Ecuador", -78.5, -0.22)])).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("lluvia", 14.0)))
        .expect(0)
        .mount(&server)
        .await;

    let mut lookup = WeatherLookup::new(&config).unwrap();
    let candidates = lookup.find_cities("Quito").await.unwrap();

    let result = lookup.resolve(&candidates, &Selection::Cancel).await.unwrap();

    assert!(result.is_none());
    assert!(lookup.recent_history().is_empty());
    assert!(!config.storage.history_path.exists());
}

#[tokio::test]
async fn test_geocoding_failure_is_single_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let lookup = WeatherLookup::new(&config).unwrap();
    let err = lookup.find_cities("Madrid").await.unwrap_err();

    assert!(matches!(err, WeatherError::NoMatch));
    assert_eq!(err.to_string(), NO_MATCH_MESSAGE);
    assert!(lookup.recent_history().is_empty());
}

#[tokio::test]
async fn test_geocoding_timeout_is_single_message() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, &dir);
    config.geocoding.timeout_ms = 50;

    Mock::given(method("GET"))
        .and(path_regex(r"^/geocoding/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(places(&[("place.1", "Madrid, España", -3.7, 40.4)]))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let lookup = WeatherLookup::new(&config).unwrap();
    let err = lookup.find_cities("Madrid").await.unwrap_err();

    assert_eq!(err.to_string(), NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_weather_failure_leaves_history_untouched() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    mount_places(&server, "Oslo", places(&[("place.4", "Oslo, Noruega", 10.75, 59.91)])).await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let mut lookup = WeatherLookup::new(&config).unwrap();
    let candidates = lookup.find_cities("Oslo").await.unwrap();
    let err = lookup
        .resolve(&candidates, &Selection::City("place.4".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "401: Invalid API key");
    assert!(lookup.recent_history().is_empty());
}

#[tokio::test]
async fn test_unknown_selection_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    let mut lookup = WeatherLookup::new(&config).unwrap();
    let err = lookup
        .resolve(&[], &Selection::City("place.404".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::UnknownSelection(id) if id == "place.404"));
}

#[tokio::test]
async fn test_history_survives_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir);

    mount_places(&server, "Roma", places(&[("place.5", "Roma, Italia", 12.49, 41.89)])).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather("soleado", 25.0)))
        .mount(&server)
        .await;

    {
        let mut lookup = WeatherLookup::new(&config).unwrap();
        let candidates = lookup.find_cities("Roma").await.unwrap();
        lookup
            .resolve(&candidates, &Selection::City("place.5".to_string()))
            .await
            .unwrap();
    }

    let lookup = WeatherLookup::new(&config).unwrap();
    assert_eq!(lookup.units(), Units::Metric);

    let entry = lookup
        .history_entry(&Selection::City("place.5".to_string()))
        .unwrap()
        .expect("entry was recorded");
    assert_eq!(entry.name, "Roma, Italia");
    assert_eq!(entry.weather.description, "soleado");

    assert!(lookup.history_entry(&Selection::Cancel).unwrap().is_none());
    assert!(lookup
        .history_entry(&Selection::City("place.999".to_string()))
        .is_err());
}
