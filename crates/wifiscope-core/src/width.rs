//! # Width Module
//!
//! Channel widths and their half-spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spectral bandwidth of one emission.
///
/// Variants are declared narrowest first; the derived ordering relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WiFiWidth {
    Mhz20,
    Mhz40,
    Mhz80,
    Mhz160,
    Mhz320,
}

impl WiFiWidth {
    pub const ALL: [Self; 5] = [
        Self::Mhz20,
        Self::Mhz40,
        Self::Mhz80,
        Self::Mhz160,
        Self::Mhz320,
    ];

    /// Full width in MHz.
    #[must_use]
    pub fn frequency_width(&self) -> u32 {
        match self {
            Self::Mhz20 => 20,
            Self::Mhz40 => 40,
            Self::Mhz80 => 80,
            Self::Mhz160 => 160,
            Self::Mhz320 => 320,
        }
    }

    /// Half width in MHz: the distance from the center to either edge.
    #[must_use]
    pub fn frequency_width_half(&self) -> u32 {
        self.frequency_width() / 2
    }

    /// Decode a platform channel-width code.
    ///
    /// Codes: 0 = 20, 1 = 40, 2 = 80, 3 = 160, 4 = 80+80, 5 = 320 MHz.
    /// 80+80 spans 160 MHz in total; unknown codes fall back to 20 MHz.
    #[must_use]
    pub fn from_platform_code(code: u32) -> Self {
        match code {
            1 => Self::Mhz40,
            2 => Self::Mhz80,
            3 | 4 => Self::Mhz160,
            5 => Self::Mhz320,
            _ => Self::Mhz20,
        }
    }

    /// Decode a width given in MHz, as printed by `iw`.
    #[must_use]
    pub fn from_mhz(mhz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.frequency_width() == mhz)
    }

    /// Resolve the center frequency of an emission.
    ///
    /// 20 MHz channels are centered on the primary frequency. Wider channels
    /// use the reported center when it is set and lies within half a width
    /// of the primary; otherwise the primary frequency is used.
    #[must_use]
    pub fn center(&self, primary: u32, reported_center: u32) -> u32 {
        if *self == Self::Mhz20 || reported_center == 0 {
            return primary;
        }
        if primary.abs_diff(reported_center) < self.frequency_width_half() {
            reported_center
        } else {
            primary
        }
    }
}

impl fmt::Display for WiFiWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.frequency_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_widths() {
        assert_eq!(WiFiWidth::Mhz20.frequency_width_half(), 10);
        assert_eq!(WiFiWidth::Mhz40.frequency_width_half(), 20);
        assert_eq!(WiFiWidth::Mhz80.frequency_width_half(), 40);
        assert_eq!(WiFiWidth::Mhz160.frequency_width_half(), 80);
        assert_eq!(WiFiWidth::Mhz320.frequency_width_half(), 160);
    }

    #[test]
    fn platform_codes() {
        assert_eq!(WiFiWidth::from_platform_code(0), WiFiWidth::Mhz20);
        assert_eq!(WiFiWidth::from_platform_code(1), WiFiWidth::Mhz40);
        assert_eq!(WiFiWidth::from_platform_code(2), WiFiWidth::Mhz80);
        assert_eq!(WiFiWidth::from_platform_code(3), WiFiWidth::Mhz160);
        assert_eq!(WiFiWidth::from_platform_code(4), WiFiWidth::Mhz160);
        assert_eq!(WiFiWidth::from_platform_code(5), WiFiWidth::Mhz320);
        assert_eq!(WiFiWidth::from_platform_code(42), WiFiWidth::Mhz20);
    }

    #[test]
    fn from_mhz() {
        assert_eq!(WiFiWidth::from_mhz(80), Some(WiFiWidth::Mhz80));
        assert_eq!(WiFiWidth::from_mhz(30), None);
    }

    #[test]
    fn center_for_20_is_primary() {
        assert_eq!(WiFiWidth::Mhz20.center(2437, 2447), 2437);
    }

    #[test]
    fn center_uses_reported_when_plausible() {
        assert_eq!(WiFiWidth::Mhz40.center(2432, 2442), 2442);
        assert_eq!(WiFiWidth::Mhz80.center(5180, 5210), 5210);
    }

    #[test]
    fn center_falls_back_to_primary() {
        assert_eq!(WiFiWidth::Mhz40.center(2432, 0), 2432);
        assert_eq!(WiFiWidth::Mhz40.center(2432, 2500), 2432);
    }

    #[test]
    fn ordering_is_narrow_first() {
        assert!(WiFiWidth::Mhz20 < WiFiWidth::Mhz40);
        assert!(WiFiWidth::Mhz160 < WiFiWidth::Mhz320);
    }
}
