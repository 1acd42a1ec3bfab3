//! Weather lookup and history error types.

use thiserror::Error;

/// Message shown for every geocoding failure.
pub const NO_MATCH_MESSAGE: &str = "No matching city found, try again!";

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Geocoding failed or found nothing. The cause is logged, not carried.
    #[error("No matching city found, try again!")]
    NoMatch,

    #[error("Unknown selection: {0}")]
    UnknownSelection(String),

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid weather response: {0}")]
    Parse(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl WeatherError {
    /// Whether the failure came from the geocoding step.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

/// Failure to persist the search history.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Cannot store search: {message} (kind: {kind})")]
    Store { message: String, kind: String },
}

impl From<std::io::Error> for HistoryError {
    fn from(e: std::io::Error) -> Self {
        Self::Store {
            message: e.to_string(),
            kind: format!("{:?}", e.kind()),
        }
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Store {
            message: e.to_string(),
            kind: "serialization".to_string(),
        }
    }
}

/// Why the history file could not be loaded at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("history file not found")]
    NotFound,

    #[error("failed to read history file: {0}")]
    Io(std::io::Error),

    #[error("history file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}
