//! # Settings Module
//!
//! Persisted user preferences: sort order, strength filter, band filter and
//! scan interval.
//!
//! Uses a redb embedded database for the on-disk store (one postcard-encoded
//! record) and an in-memory store for tests and dry runs.

mod redb_store;

pub use redb_store::RedbSettingsStore;

use crate::band::WiFiBand;
use crate::error::Result;
use crate::sort::SortBy;
use crate::strength::Strength;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default scan interval in seconds.
pub const DEFAULT_SCAN_INTERVAL_SECS: u32 = 5;

/// The persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub sort_by: SortBy,
    pub strengths: BTreeSet<Strength>,
    /// Only show this band; `None` shows every band.
    pub band: Option<WiFiBand>,
    pub scan_interval_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            strengths: Strength::ALL.into_iter().collect(),
            band: None,
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
        }
    }
}

/// Backing store for [`Settings`].
pub trait SettingsStore {
    /// Load the settings, falling back to defaults when nothing was saved.
    fn load(&self) -> Result<Settings>;

    /// Replace the saved settings.
    fn save(&mut self, settings: &Settings) -> Result<()>;

    /// Replace only the strength filter selection.
    fn save_strengths(&mut self, strengths: &BTreeSet<Strength>) -> Result<()> {
        let mut settings = self.load()?;
        settings.strengths = strengths.clone();
        self.save(&settings)
    }
}

/// Settings held in process memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Settings,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<()> {
        self.settings = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sort_by, SortBy::Channel);
        assert_eq!(settings.strengths.len(), Strength::ALL.len());
        assert_eq!(settings.band, None);
        assert_eq!(settings.scan_interval_secs, DEFAULT_SCAN_INTERVAL_SECS);
    }

    #[test]
    fn memory_store_save_strengths_keeps_other_fields() {
        let mut store = MemorySettingsStore::new(Settings {
            sort_by: SortBy::Ssid,
            ..Settings::default()
        });
        let strengths: BTreeSet<Strength> = [Strength::Four].into_iter().collect();

        store.save_strengths(&strengths).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.strengths, strengths);
        assert_eq!(loaded.sort_by, SortBy::Ssid);
    }
}
