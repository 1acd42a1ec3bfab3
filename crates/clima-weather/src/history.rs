//! Persistent search history.
//!
//! Records are kept most-recent-first with at most one record per city id.
//! The whole list is written back to a single JSON document after every
//! change.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HistoryError, LoadError};
use crate::types::{CityCandidate, HistoryRecord, WeatherSnapshot};

/// Size of the "recent" view. A re-searched city already inside this window
/// keeps its position; one outside it is promoted to the front.
pub const RECENT_WINDOW: usize = 5;

#[derive(Debug, Default, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    historial: Vec<HistoryRecord>,
}

#[derive(Serialize)]
struct HistoryFileRef<'a> {
    historial: &'a [HistoryRecord],
}

/// Read the history document at `path`.
pub fn read_history(path: &Path) -> Result<Vec<HistoryRecord>, LoadError> {
    let json = fs::read_to_string(path)?;
    let file: HistoryFile = serde_json::from_str(&json)?;
    Ok(file.historial)
}

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Load the history at `path`. A missing or unreadable file yields an
    /// empty history; the reason only reaches the logs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let records = match read_history(&path) {
            Ok(records) => {
                tracing::info!(count = records.len(), "Loaded search history from {:?}", path);
                dedupe(records)
            }
            Err(LoadError::NotFound) => {
                tracing::debug!("No search history at {:?}, starting empty", path);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring search history at {:?}: {}", path, e);
                Vec::new()
            }
        };

        Self { path, records }
    }

    /// Record a completed lookup and flush the history to disk.
    ///
    /// A city already present gets its weather replaced; it moves to the
    /// front only when it sits outside the recent window. A new city is
    /// prepended. The in-memory list keeps the change even if the flush fails.
    pub fn record_search(
        &mut self,
        city: &CityCandidate,
        weather: WeatherSnapshot,
    ) -> Result<(), HistoryError> {
        match self.records.iter().position(|r| r.id == city.id) {
            Some(index) => {
                self.records[index].weather = weather;
                if index >= RECENT_WINDOW {
                    let record = self.records.remove(index);
                    self.records.insert(0, record);
                    tracing::debug!(id = %city.id, from = index, "Promoted history entry");
                }
            }
            None => {
                self.records.insert(0, HistoryRecord::new(city, weather));
                tracing::debug!(id = %city.id, "Added history entry");
            }
        }

        self.persist()
    }

    /// The first [`RECENT_WINDOW`] records, or all of them if fewer.
    pub fn recent_history(&self) -> &[HistoryRecord] {
        let end = self.records.len().min(RECENT_WINDOW);
        &self.records[..end]
    }

    /// Look up a record by city id.
    pub fn find(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Every record, most recent first.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&HistoryFileRef {
            historial: &self.records,
        })?;

        fs::write(&self.path, json)?;

        tracing::debug!(count = self.records.len(), "Stored search history at {:?}", self.path);
        Ok(())
    }
}

/// Keep the first record for each id.
fn dedupe(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let records: Vec<_> = records
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();

    if records.len() != before {
        tracing::warn!(
            dropped = before - records.len(),
            "Dropped duplicate entries from search history"
        );
    }
    records
}
