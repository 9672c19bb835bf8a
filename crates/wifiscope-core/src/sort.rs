//! # Sort Module
//!
//! Total orderings over [`WiFiDetail`] used to lay out scan lists.
//!
//! Text keys compare case-insensitively. When two keys differ only in case
//! they fall back to a case-sensitive comparison, so `"ssid1"` still sorts
//! after `"SSID1"` and the ordering stays total.
//!
//! These orderings include the signal level, which [`WiFiSignal`] equality
//! ignores. They are therefore not consistent with `WiFiDetail` equality.
//!
//! [`WiFiSignal`]: crate::signal::WiFiSignal

use crate::detail::WiFiDetail;
use crate::error::WifiError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Compare two strings ignoring case, breaking case-only ties by exact order.
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

fn by_ssid(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    compare_ignore_case(a.ssid(), b.ssid())
}

fn by_bssid(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    compare_ignore_case(a.bssid(), b.bssid())
}

/// Stronger (less negative) level first.
fn by_level_descending(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    b.signal.level().cmp(&a.signal.level())
}

/// Primary channel, then SSID, then BSSID, then strongest level first.
#[must_use]
pub fn sort_by_channel(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    a.signal
        .primary_channel()
        .channel
        .cmp(&b.signal.primary_channel().channel)
        .then_with(|| by_ssid(a, b))
        .then_with(|| by_bssid(a, b))
        .then_with(|| by_level_descending(a, b))
}

/// Strongest level first, then SSID, then BSSID.
#[must_use]
pub fn sort_by_strength(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    by_level_descending(a, b)
        .then_with(|| by_ssid(a, b))
        .then_with(|| by_bssid(a, b))
}

/// SSID, then BSSID, then strongest level first.
#[must_use]
pub fn sort_by_ssid(a: &WiFiDetail, b: &WiFiDetail) -> Ordering {
    by_ssid(a, b)
        .then_with(|| by_bssid(a, b))
        .then_with(|| by_level_descending(a, b))
}

/// Selectable scan list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    Strength,
    Ssid,
    #[default]
    Channel,
}

impl SortBy {
    pub const ALL: [Self; 3] = [Self::Strength, Self::Ssid, Self::Channel];

    #[must_use]
    pub fn comparator(&self) -> fn(&WiFiDetail, &WiFiDetail) -> Ordering {
        match self {
            Self::Strength => sort_by_strength,
            Self::Ssid => sort_by_ssid,
            Self::Channel => sort_by_channel,
        }
    }

    /// Sort in place. The sort is stable.
    pub fn sort(&self, details: &mut [WiFiDetail]) {
        details.sort_by(self.comparator());
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Strength => "strength",
            Self::Ssid => "ssid",
            Self::Channel => "channel",
        };
        f.write_str(label)
    }
}

impl FromStr for SortBy {
    type Err = WifiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" | "level" => Ok(Self::Strength),
            "ssid" | "name" => Ok(Self::Ssid),
            "channel" => Ok(Self::Channel),
            other => Err(WifiError::Parse(format!("unknown sort order '{other}'"))),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
