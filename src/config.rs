//! Resolved runtime configuration.
//!
//! The binary parses its command line into a [`DesktopConfig`]; the library
//! only ever sees the resolved values.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tracing::Level;

use crate::constants::{TOUR_AUTO_START_DELAY, TOUR_COMPLETE_KEY};
use crate::layout::CellMetrics;
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopConfig {
    /// JSON file backing the key-value store. `None` keeps everything in
    /// memory for the session.
    pub store_path: Option<PathBuf>,
    /// Forget the tour completion flag before startup.
    pub reset_tour: bool,
    pub tour_delay: Duration,
    pub cell_metrics: CellMetrics,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    pub poll_interval: Duration,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            reset_tour: false,
            tour_delay: TOUR_AUTO_START_DELAY,
            cell_metrics: CellMetrics::default(),
            log_file: None,
            log_level: Level::DEBUG,
            poll_interval: Duration::from_millis(16),
        }
    }
}

impl DesktopConfig {
    /// Opens the configured store and applies `reset_tour`.
    pub fn open_store(&self) -> Result<Rc<dyn KeyValueStore>, StoreError> {
        let store: Rc<dyn KeyValueStore> = match &self.store_path {
            Some(path) => Rc::new(JsonFileStore::open(path)?),
            None => Rc::new(MemoryStore::new()),
        };
        if self.reset_tour {
            tracing::info!("resetting tour completion flag");
            store.remove(TOUR_COMPLETE_KEY)?;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let config = DesktopConfig::default();
        assert_eq!(config.tour_delay, Duration::from_millis(1000));
        assert_eq!(config.cell_metrics, CellMetrics::new(10, 20));
        assert_eq!(config.poll_interval, Duration::from_millis(16));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn reset_tour_clears_persisted_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set(TOUR_COMPLETE_KEY, "true").unwrap();
        }
        let kept = DesktopConfig {
            store_path: Some(path.clone()),
            ..DesktopConfig::default()
        };
        assert_eq!(
            kept.open_store().unwrap().get(TOUR_COMPLETE_KEY).as_deref(),
            Some("true")
        );
        let reset = DesktopConfig {
            store_path: Some(path),
            reset_tour: true,
            ..DesktopConfig::default()
        };
        assert_eq!(reset.open_store().unwrap().get(TOUR_COMPLETE_KEY), None);
    }
}
