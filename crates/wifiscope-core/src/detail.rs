//! # Detail Module
//!
//! A named, identified access point observation.
//!
//! All values here are plain immutable data: built from one scan record,
//! dropped when the next scan supersedes it.

use crate::signal::WiFiSignal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Placeholder shown for networks that do not broadcast an SSID.
pub const HIDDEN_SSID: &str = "*hidden*";

// =============================================================================
// IDENTIFIER
// =============================================================================

/// Network name plus access point hardware address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiFiIdentifier {
    pub ssid: String,
    pub bssid: String,
}

impl WiFiIdentifier {
    #[must_use]
    pub fn new(ssid: impl Into<String>, bssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.ssid.trim().is_empty()
    }

    /// SSID for display; hidden networks render as `*hidden*`.
    #[must_use]
    pub fn ssid_display(&self) -> &str {
        if self.is_hidden() {
            HIDDEN_SSID
        } else {
            &self.ssid
        }
    }

    /// `"SSID (BSSID)"`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.ssid_display(), self.bssid)
    }

    /// Case-insensitive BSSID match.
    #[must_use]
    pub fn same_bssid(&self, bssid: &str) -> bool {
        self.bssid.eq_ignore_ascii_case(bssid)
    }
}

// =============================================================================
// SECURITY
// =============================================================================

/// Security protocol advertised by an access point, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Security {
    None,
    Wps,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
}

impl Security {
    /// Classify one bracketed capability token, e.g. `WPA2-PSK-CCMP`.
    fn from_token(token: &str) -> Option<Self> {
        let token = token.to_ascii_uppercase();
        let prefix = token.split('-').next().unwrap_or_default();
        if prefix == "WPA3" || token.contains("SAE") || token.contains("OWE") {
            return Some(Self::Wpa3);
        }
        match prefix {
            "WPA2" | "RSN" => Some(Self::Wpa2),
            "WPA" => Some(Self::Wpa),
            "WEP" => Some(Self::Wep),
            "WPS" => Some(Self::Wps),
            _ => None,
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "Open",
            Self::Wps => "WPS",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2",
            Self::Wpa3 => "WPA3",
        };
        f.write_str(label)
    }
}

/// Raw capability string and the security types parsed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiFiSecurity {
    pub capabilities: String,
    pub types: BTreeSet<Security>,
}

impl WiFiSecurity {
    pub const EMPTY: Self = Self {
        capabilities: String::new(),
        types: BTreeSet::new(),
    };

    /// Parse a capability string such as `[WPA2-PSK-CCMP][ESS][WPS]`.
    #[must_use]
    pub fn parse(capabilities: impl Into<String>) -> Self {
        let capabilities = capabilities.into();
        let types = capabilities
            .split(['[', ']'])
            .filter(|token| !token.is_empty())
            .filter_map(Security::from_token)
            .collect();
        Self {
            capabilities,
            types,
        }
    }

    /// The strongest advertised security type.
    #[must_use]
    pub fn security(&self) -> Security {
        self.types.last().copied().unwrap_or(Security::None)
    }
}

// =============================================================================
// ADDITIONAL
// =============================================================================

/// Metadata that is not part of the radio observation itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiFiAdditional {
    pub vendor_name: String,
    /// The device is currently associated with this access point.
    pub connected: bool,
}

impl WiFiAdditional {
    pub const EMPTY: Self = Self {
        vendor_name: String::new(),
        connected: false,
    };
}

// =============================================================================
// DETAIL
// =============================================================================

/// One access point as seen in one scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiFiDetail {
    pub identifier: WiFiIdentifier,
    pub security: WiFiSecurity,
    pub signal: WiFiSignal,
    pub additional: WiFiAdditional,
}

impl WiFiDetail {
    #[must_use]
    pub fn new(
        identifier: WiFiIdentifier,
        security: WiFiSecurity,
        signal: WiFiSignal,
        additional: WiFiAdditional,
    ) -> Self {
        Self {
            identifier,
            security,
            signal,
            additional,
        }
    }

    #[must_use]
    pub fn ssid(&self) -> &str {
        &self.identifier.ssid
    }

    #[must_use]
    pub fn bssid(&self) -> &str {
        &self.identifier.bssid
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.additional.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::WiFiWidth;

    #[test]
    fn hidden_ssid_display() {
        let hidden = WiFiIdentifier::new("", "aa:bb:cc:dd:ee:ff");
        assert!(hidden.is_hidden());
        assert_eq!(hidden.ssid_display(), HIDDEN_SSID);
        assert_eq!(hidden.title(), "*hidden* (aa:bb:cc:dd:ee:ff)");

        let named = WiFiIdentifier::new("home", "aa:bb:cc:dd:ee:ff");
        assert_eq!(named.ssid_display(), "home");
    }

    #[test]
    fn bssid_match_ignores_case() {
        let id = WiFiIdentifier::new("home", "AA:BB:CC:DD:EE:FF");
        assert!(id.same_bssid("aa:bb:cc:dd:ee:ff"));
        assert!(!id.same_bssid("aa:bb:cc:dd:ee:00"));
    }

    #[test]
    fn parse_wpa2_capabilities() {
        let security = WiFiSecurity::parse("[WPA2-PSK-CCMP][ESS][WPS]");
        assert!(security.types.contains(&Security::Wpa2));
        assert!(security.types.contains(&Security::Wps));
        assert_eq!(security.security(), Security::Wpa2);
    }

    #[test]
    fn parse_wpa3_and_legacy() {
        assert_eq!(
            WiFiSecurity::parse("[RSN-SAE-CCMP][ESS]").security(),
            Security::Wpa3
        );
        assert_eq!(WiFiSecurity::parse("[WPA-PSK-TKIP]").security(), Security::Wpa);
        assert_eq!(WiFiSecurity::parse("[WEP]").security(), Security::Wep);
    }

    #[test]
    fn open_network_has_no_security() {
        assert_eq!(WiFiSecurity::parse("[ESS]").security(), Security::None);
        assert_eq!(WiFiSecurity::EMPTY.security(), Security::None);
    }

    #[test]
    fn detail_accessors() {
        let detail = WiFiDetail::new(
            WiFiIdentifier::new("SSID1", "BSSID1"),
            WiFiSecurity::EMPTY,
            WiFiSignal::new(2462, 2462, WiFiWidth::Mhz20, -55),
            WiFiAdditional::EMPTY,
        );
        assert_eq!(detail.ssid(), "SSID1");
        assert_eq!(detail.bssid(), "BSSID1");
        assert!(!detail.is_connected());
    }
}
