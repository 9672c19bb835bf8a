//! # Transform Module
//!
//! Conversion from raw platform scan records into [`WiFiDetail`] values.
//!
//! Raw records mirror what a platform scan API hands out: integer codes for
//! width and standard, a bracketed capability string, and a center frequency
//! that may be zero when the driver does not report one.

use crate::band::WiFiBand;
use crate::detail::{WiFiAdditional, WiFiDetail, WiFiIdentifier, WiFiSecurity};
use crate::filter::StrengthFilter;
use crate::signal::{SignalExtra, WiFiSignal, WiFiStandard};
use crate::sort::SortBy;
use crate::width::WiFiWidth;
use serde::{Deserialize, Serialize};

/// One raw scan result as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanRecord {
    pub ssid: String,
    pub bssid: String,
    /// Bracketed capability string, e.g. `[WPA2-PSK-CCMP][ESS]`.
    pub capabilities: String,
    /// Primary frequency in MHz.
    pub frequency: u32,
    /// Center frequency of the whole channel in MHz; 0 when unknown.
    pub center_freq0: u32,
    /// Platform channel-width code, see [`WiFiWidth::from_platform_code`].
    pub channel_width: u32,
    /// Level in dBm.
    pub level: i32,
    pub is_80211mc: bool,
    pub fast_roaming: bool,
    /// Platform standard code, see [`WiFiStandard::from_platform_code`].
    pub wifi_standard: u32,
}

/// The access point the device is currently associated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    pub ssid: String,
    pub bssid: String,
    pub ip_address: String,
    /// Link speed in Mbit/s.
    pub link_speed: u32,
}

impl ConnectionInfo {
    /// SSID with the surrounding quotes some platforms add removed.
    #[must_use]
    pub fn ssid_unquoted(&self) -> &str {
        self.ssid
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.ssid)
    }
}

/// One scan worth of details plus the current connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiFiData {
    pub details: Vec<WiFiDetail>,
    pub connection: Option<ConnectionInfo>,
}

impl WiFiData {
    /// The detail of the access point the device is associated with.
    #[must_use]
    pub fn connected(&self) -> Option<&WiFiDetail> {
        self.details.iter().find(|detail| detail.is_connected())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Apply strength and band filters, then sort.
    #[must_use]
    pub fn filtered(
        &self,
        filter: &StrengthFilter,
        sort_by: SortBy,
        band: Option<WiFiBand>,
    ) -> Vec<WiFiDetail> {
        let mut details: Vec<WiFiDetail> = filter
            .apply(&self.details)
            .into_iter()
            .filter(|detail| band.is_none_or(|b| detail.signal.band() == b))
            .cloned()
            .collect();
        sort_by.sort(&mut details);
        details
    }
}

/// Builds [`WiFiDetail`] values from raw records.
pub struct Transformer;

impl Transformer {
    /// Build the signal part of a record.
    #[must_use]
    pub fn signal(record: &ScanRecord) -> WiFiSignal {
        let width = WiFiWidth::from_platform_code(record.channel_width);
        let center = width.center(record.frequency, record.center_freq0);
        let extra = SignalExtra {
            is_80211mc: record.is_80211mc,
            fast_roaming: record.fast_roaming,
            standard: WiFiStandard::from_platform_code(record.wifi_standard),
        };
        WiFiSignal::with_extra(record.frequency, center, width, record.level, extra)
    }

    /// Build one detail, marking it connected when the BSSID matches.
    #[must_use]
    pub fn detail(record: &ScanRecord, connection: Option<&ConnectionInfo>) -> WiFiDetail {
        let identifier = WiFiIdentifier::new(record.ssid.clone(), record.bssid.clone());
        let connected = connection.is_some_and(|c| identifier.same_bssid(&c.bssid));
        WiFiDetail::new(
            identifier,
            WiFiSecurity::parse(record.capabilities.clone()),
            Self::signal(record),
            WiFiAdditional {
                vendor_name: String::new(),
                connected,
            },
        )
    }

    /// Transform a whole scan. No record is dropped.
    #[must_use]
    pub fn transform(records: &[ScanRecord], connection: Option<ConnectionInfo>) -> WiFiData {
        let details = records
            .iter()
            .map(|record| Self::detail(record, connection.as_ref()))
            .collect();
        WiFiData {
            details,
            connection,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
