//! JSON snapshot provider.
//!
//! A snapshot file stands in for the radio: it holds the enabled state,
//! capability flags, the scan records and the current connection. The file
//! is re-read on every query so edits are picked up immediately, and the
//! switch writes the enabled state back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wifiscope_core::{
    ConnectionInfo, PlatformError, PlatformVersion, ScanRecord, WiFiSwitch, WifiManager,
};

/// Contents of a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub enabled: bool,
    pub api_level: u32,
    pub supports_5ghz: bool,
    pub supports_6ghz: bool,
    pub scan_throttle: bool,
    pub records: Vec<ScanRecord>,
    pub connection: Option<ConnectionInfo>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            enabled: true,
            api_level: PlatformVersion::R.0,
            supports_5ghz: true,
            supports_6ghz: false,
            scan_throttle: false,
            records: Vec::new(),
            connection: None,
        }
    }
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PlatformError::Parse(format!("{}: {e}", path.display())))
    }

    pub fn store(&self, path: &Path) -> Result<(), PlatformError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PlatformError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// [`WifiManager`] backed by a snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    path: PathBuf,
}

impl SnapshotManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// API level recorded in the snapshot; [`PlatformVersion::R`] if unreadable.
    pub fn version(&self) -> PlatformVersion {
        Snapshot::load(&self.path)
            .map(|s| PlatformVersion(s.api_level))
            .unwrap_or(PlatformVersion::R)
    }

    fn snapshot(&self) -> Result<Snapshot, PlatformError> {
        Snapshot::load(&self.path)
    }
}

impl WifiManager for SnapshotManager {
    fn is_wifi_enabled(&self) -> Result<bool, PlatformError> {
        Ok(self.snapshot()?.enabled)
    }

    fn start_scan(&self) -> Result<bool, PlatformError> {
        // A snapshot is always "freshly scanned" while the radio is on
        Ok(self.snapshot()?.enabled)
    }

    fn scan_results(&self) -> Result<Option<Vec<ScanRecord>>, PlatformError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.enabled.then_some(snapshot.records))
    }

    fn connection_info(&self) -> Result<Option<ConnectionInfo>, PlatformError> {
        Ok(self.snapshot()?.connection)
    }

    fn is_5ghz_band_supported(&self) -> Result<bool, PlatformError> {
        Ok(self.snapshot()?.supports_5ghz)
    }

    fn is_6ghz_band_supported(&self) -> Result<bool, PlatformError> {
        Ok(self.snapshot()?.supports_6ghz)
    }

    fn is_scan_throttle_enabled(&self) -> Result<bool, PlatformError> {
        Ok(self.snapshot()?.scan_throttle)
    }
}

/// [`WiFiSwitch`] that flips the `enabled` flag of a snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotSwitch {
    path: PathBuf,
}

impl SnapshotSwitch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn set(&self, enabled: bool) -> Result<bool, PlatformError> {
        let mut snapshot = Snapshot::load(&self.path)?;
        snapshot.enabled = enabled;
        snapshot.store(&self.path)?;
        tracing::info!(path = %self.path.display(), enabled, "snapshot radio switched");
        Ok(true)
    }
}

impl WiFiSwitch for SnapshotSwitch {
    fn on(&self) -> Result<bool, PlatformError> {
        self.set(true)
    }

    fn off(&self) -> Result<bool, PlatformError> {
        self.set(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"{"records": [{"ssid": "home", "bssid": "aa:bb:cc:dd:ee:ff", "frequency": 2437, "level": -50}]}"#,
        );
        let snapshot = Snapshot::load(&path).unwrap();
        assert!(snapshot.enabled);
        assert_eq!(snapshot.api_level, 30);
        assert_eq!(snapshot.records[0].channel_width, 0);
        assert_eq!(snapshot.records[0].capabilities, "");
    }

    #[test]
    fn disabled_radio_has_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"enabled": false}"#);
        let manager = SnapshotManager::new(&path);
        assert_eq!(manager.scan_results().unwrap(), None);
        assert!(!manager.start_scan().unwrap());
    }

    #[test]
    fn unreadable_snapshot_is_a_fault() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SnapshotManager::new(dir.path().join("missing.json"));
        assert!(matches!(manager.is_wifi_enabled(), Err(PlatformError::Io(_))));

        let path = write(&dir, "not json");
        let manager = SnapshotManager::new(&path);
        assert!(matches!(manager.scan_results(), Err(PlatformError::Parse(_))));
        assert_eq!(manager.version(), PlatformVersion::R);
    }

    #[test]
    fn switch_writes_back_enabled_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"enabled": true, "api_level": 33}"#);
        let switch = SnapshotSwitch::new(&path);

        assert!(switch.off().unwrap());
        let snapshot = Snapshot::load(&path).unwrap();
        assert!(!snapshot.enabled);
        assert_eq!(snapshot.api_level, 33);

        assert!(switch.on().unwrap());
        assert!(Snapshot::load(&path).unwrap().enabled);
    }
}
