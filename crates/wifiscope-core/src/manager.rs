//! # Manager Module
//!
//! Fault-tolerant facade over the platform WiFi API.
//!
//! The platform is reached only through two traits:
//! - [`WifiManager`]: queries and scans
//! - [`WiFiSwitch`]: turning the radio on and off
//!
//! [`WiFiManagerWrapper`] never propagates a [`PlatformError`]. Every fault is
//! logged and replaced by a safe default: `false`, an empty list or `None`.

use crate::error::PlatformError;
use crate::transform::{ConnectionInfo, ScanRecord, Transformer, WiFiData};
use std::fmt;

// =============================================================================
// PLATFORM TRAITS
// =============================================================================

/// Capability provider for WiFi queries.
pub trait WifiManager {
    fn is_wifi_enabled(&self) -> Result<bool, PlatformError>;

    /// Request a new scan. `Ok(false)` means the platform refused it.
    fn start_scan(&self) -> Result<bool, PlatformError>;

    /// Results of the latest scan. `None` when the platform has none to give.
    fn scan_results(&self) -> Result<Option<Vec<ScanRecord>>, PlatformError>;

    fn connection_info(&self) -> Result<Option<ConnectionInfo>, PlatformError>;

    fn is_5ghz_band_supported(&self) -> Result<bool, PlatformError>;

    /// Only queried on platform version [`PlatformVersion::R`] and later.
    fn is_6ghz_band_supported(&self) -> Result<bool, PlatformError>;

    /// Only queried on platform version [`PlatformVersion::R`] and later.
    fn is_scan_throttle_enabled(&self) -> Result<bool, PlatformError>;
}

/// Radio on/off control.
pub trait WiFiSwitch {
    fn on(&self) -> Result<bool, PlatformError>;

    fn off(&self) -> Result<bool, PlatformError>;
}

/// Platform API level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformVersion(pub u32);

impl PlatformVersion {
    /// First version exposing 6 GHz support and scan-throttle queries.
    pub const R: Self = Self(30);
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

// =============================================================================
// WRAPPER
// =============================================================================

/// Facade that turns platform faults into safe defaults.
pub struct WiFiManagerWrapper<M, S> {
    manager: M,
    switch: S,
    version: PlatformVersion,
}

/// Unwrap a platform result, logging the fault and substituting `default`.
fn or_default<T>(operation: &str, result: Result<T, PlatformError>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(operation, error = %err, "platform fault, using default");
            default
        }
    }
}

impl<M: WifiManager, S: WiFiSwitch> WiFiManagerWrapper<M, S> {
    #[must_use]
    pub fn new(manager: M, switch: S, version: PlatformVersion) -> Self {
        Self {
            manager,
            switch,
            version,
        }
    }

    #[must_use]
    pub fn manager(&self) -> &M {
        &self.manager
    }

    #[must_use]
    pub fn switch(&self) -> &S {
        &self.switch
    }

    #[must_use]
    pub fn version(&self) -> PlatformVersion {
        self.version
    }

    /// True on platform version R or later.
    #[must_use]
    pub fn min_version_r(&self) -> bool {
        self.version >= PlatformVersion::R
    }

    #[must_use]
    pub fn wifi_enabled(&self) -> bool {
        or_default("is_wifi_enabled", self.manager.is_wifi_enabled(), false)
    }

    /// Turn the radio on. Already enabled counts as success.
    #[must_use]
    pub fn enable_wifi(&self) -> bool {
        if self.wifi_enabled() {
            return true;
        }
        or_default("switch_on", self.switch.on(), false)
    }

    /// Turn the radio off. Already disabled counts as success.
    #[must_use]
    pub fn disable_wifi(&self) -> bool {
        if !self.wifi_enabled() {
            return true;
        }
        or_default("switch_off", self.switch.off(), false)
    }

    #[must_use]
    pub fn start_scan(&self) -> bool {
        or_default("start_scan", self.manager.start_scan(), false)
    }

    /// Latest scan results; never absent.
    #[must_use]
    pub fn scan_results(&self) -> Vec<ScanRecord> {
        or_default("scan_results", self.manager.scan_results(), None).unwrap_or_default()
    }

    #[must_use]
    pub fn wifi_info(&self) -> Option<ConnectionInfo> {
        or_default("connection_info", self.manager.connection_info(), None)
    }

    #[must_use]
    pub fn is_5ghz_band_supported(&self) -> bool {
        or_default(
            "is_5ghz_band_supported",
            self.manager.is_5ghz_band_supported(),
            false,
        )
    }

    #[must_use]
    pub fn is_6ghz_band_supported(&self) -> bool {
        if !self.min_version_r() {
            return false;
        }
        or_default(
            "is_6ghz_band_supported",
            self.manager.is_6ghz_band_supported(),
            false,
        )
    }

    #[must_use]
    pub fn is_scan_throttle_enabled(&self) -> bool {
        if !self.min_version_r() {
            return false;
        }
        or_default(
            "is_scan_throttle_enabled",
            self.manager.is_scan_throttle_enabled(),
            false,
        )
    }

    /// Latest scan results and connection, transformed into details.
    #[must_use]
    pub fn wifi_data(&self) -> WiFiData {
        let records = self.scan_results();
        let connection = self.wifi_info();
        tracing::debug!(records = records.len(), connected = connection.is_some(), "transforming scan");
        Transformer::transform(&records, connection)
    }
}

// =============================================================================
// TESTS
// =============================================================================
