use clima_core::{AppError, StorageError, WeatherError as CoreWeatherError};

use crate::error::{HistoryError, WeatherError};

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::NoMatch => AppError::Weather(CoreWeatherError::NoMatch),
            WeatherError::UnknownSelection(id) => {
                AppError::Weather(CoreWeatherError::UnknownSelection(id))
            }
            WeatherError::History(HistoryError::Store { message, kind }) => {
                AppError::Storage(StorageError::StoreFailed { message, kind })
            }
            other @ (WeatherError::Network(_)
            | WeatherError::Api { .. }
            | WeatherError::Parse(_)) => {
                AppError::Weather(CoreWeatherError::Provider(other.to_string()))
            }
        }
    }
}
