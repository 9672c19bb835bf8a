//! # Platform Module
//!
//! Concrete WiFi providers behind the core [`WifiManager`] and [`WiFiSwitch`]
//! traits.
//!
//! Two providers exist:
//! - Snapshot: a JSON file describing the radio, used for offline analysis and tests
//! - Iw: the live Linux radio through `iw`, with `nmcli` or `rfkill` for the radio state

mod iw;
mod snapshot;

pub use iw::{
    IwManager, NmcliSwitch, parse_iw_link, parse_iw_scan_output, parse_phy_frequencies,
    parse_radio_state, parse_rfkill, unescape_ssid,
};
pub use snapshot::{Snapshot, SnapshotManager, SnapshotSwitch};

use std::path::Path;
use wifiscope_core::{
    ConnectionInfo, PlatformError, PlatformVersion, ScanRecord, WiFiManagerWrapper, WiFiSwitch,
    WifiManager,
};

/// Provider selected at startup.
#[derive(Debug, Clone)]
pub enum PlatformManager {
    Snapshot(SnapshotManager),
    Iw(IwManager),
}

impl WifiManager for PlatformManager {
    fn is_wifi_enabled(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(m) => m.is_wifi_enabled(),
            Self::Iw(m) => m.is_wifi_enabled(),
        }
    }

    fn start_scan(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(m) => m.start_scan(),
            Self::Iw(m) => m.start_scan(),
        }
    }

    fn scan_results(&self) -> Result<Option<Vec<ScanRecord>>, PlatformError> {
        match self {
            Self::Snapshot(m) => m.scan_results(),
            Self::Iw(m) => m.scan_results(),
        }
    }

    fn connection_info(&self) -> Result<Option<ConnectionInfo>, PlatformError> {
        match self {
            Self::Snapshot(m) => m.connection_info(),
            Self::Iw(m) => m.connection_info(),
        }
    }

    fn is_5ghz_band_supported(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(m) => m.is_5ghz_band_supported(),
            Self::Iw(m) => m.is_5ghz_band_supported(),
        }
    }

    fn is_6ghz_band_supported(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(m) => m.is_6ghz_band_supported(),
            Self::Iw(m) => m.is_6ghz_band_supported(),
        }
    }

    fn is_scan_throttle_enabled(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(m) => m.is_scan_throttle_enabled(),
            Self::Iw(m) => m.is_scan_throttle_enabled(),
        }
    }
}

/// Radio switch matching [`PlatformManager`].
#[derive(Debug, Clone)]
pub enum PlatformSwitch {
    Snapshot(SnapshotSwitch),
    Nmcli(NmcliSwitch),
}

impl WiFiSwitch for PlatformSwitch {
    fn on(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(s) => s.on(),
            Self::Nmcli(s) => s.on(),
        }
    }

    fn off(&self) -> Result<bool, PlatformError> {
        match self {
            Self::Snapshot(s) => s.off(),
            Self::Nmcli(s) => s.off(),
        }
    }
}

pub type Platform = WiFiManagerWrapper<PlatformManager, PlatformSwitch>;

/// Build the wrapper for a snapshot file, or for the live radio on `interface`.
///
/// A snapshot carries its own API level; the live radio is treated as
/// [`PlatformVersion::R`] since every nl80211 query is available.
pub fn connect(snapshot: Option<&Path>, interface: &str) -> Platform {
    match snapshot {
        Some(path) => {
            let manager = SnapshotManager::new(path);
            let version = manager.version();
            tracing::debug!(path = %path.display(), %version, "using snapshot provider");
            WiFiManagerWrapper::new(
                PlatformManager::Snapshot(manager),
                PlatformSwitch::Snapshot(SnapshotSwitch::new(path)),
                version,
            )
        }
        None => {
            tracing::debug!(interface, "using iw provider");
            WiFiManagerWrapper::new(
                PlatformManager::Iw(IwManager::new(interface)),
                PlatformSwitch::Nmcli(NmcliSwitch),
                PlatformVersion::R,
            )
        }
    }
}
