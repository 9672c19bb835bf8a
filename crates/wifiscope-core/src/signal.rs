//! # Signal Module
//!
//! One observed radio emission and the geometry derived from it.
//!
//! A [`WiFiSignal`] is identified by its primary frequency and width only.
//! Center frequency, level and extras describe the observation but do not
//! take part in equality, hashing or ordering.

use crate::band::{WiFiBand, WiFiChannel};
use crate::strength::Strength;
use crate::width::WiFiWidth;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Free-space path loss constant for MHz and meters.
const DISTANCE_MHZ_M: f64 = 27.55;

// =============================================================================
// EXTRAS
// =============================================================================

/// 802.11 generation reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WiFiStandard {
    #[default]
    Unknown,
    Legacy,
    N,
    Ac,
    Ax,
    Be,
}

impl WiFiStandard {
    /// Decode a platform standard code (1 = legacy, 4 = n, 5 = ac, 6 = ax, 8 = be).
    #[must_use]
    pub fn from_platform_code(code: u32) -> Self {
        match code {
            1 => Self::Legacy,
            4 => Self::N,
            5 => Self::Ac,
            6 => Self::Ax,
            8 => Self::Be,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for WiFiStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "?",
            Self::Legacy => "802.11a/b/g",
            Self::N => "802.11n",
            Self::Ac => "802.11ac",
            Self::Ax => "802.11ax",
            Self::Be => "802.11be",
        };
        f.write_str(label)
    }
}

/// Observation metadata that does not affect signal identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalExtra {
    /// Access point answers 802.11mc round-trip-time ranging.
    pub is_80211mc: bool,
    /// Access point advertises 802.11r fast roaming.
    pub fast_roaming: bool,
    pub standard: WiFiStandard,
}

impl SignalExtra {
    pub const EMPTY: Self = Self {
        is_80211mc: false,
        fast_roaming: false,
        standard: WiFiStandard::Unknown,
    };
}

// =============================================================================
// SIGNAL
// =============================================================================

/// One observed radio emission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WiFiSignal {
    primary_frequency: u32,
    center_frequency: u32,
    width: WiFiWidth,
    level: i32,
    extra: SignalExtra,
}

impl WiFiSignal {
    /// Create a signal without extras.
    #[must_use]
    pub fn new(primary_frequency: u32, center_frequency: u32, width: WiFiWidth, level: i32) -> Self {
        Self::with_extra(
            primary_frequency,
            center_frequency,
            width,
            level,
            SignalExtra::EMPTY,
        )
    }

    #[must_use]
    pub fn with_extra(
        primary_frequency: u32,
        center_frequency: u32,
        width: WiFiWidth,
        level: i32,
        extra: SignalExtra,
    ) -> Self {
        Self {
            primary_frequency,
            center_frequency,
            width,
            level,
            extra,
        }
    }

    #[must_use]
    pub fn primary_frequency(&self) -> u32 {
        self.primary_frequency
    }

    #[must_use]
    pub fn center_frequency(&self) -> u32 {
        self.center_frequency
    }

    #[must_use]
    pub fn width(&self) -> WiFiWidth {
        self.width
    }

    /// Signal level in dBm.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[must_use]
    pub fn extra(&self) -> SignalExtra {
        self.extra
    }

    /// Band of the primary frequency.
    #[must_use]
    pub fn band(&self) -> WiFiBand {
        WiFiBand::find(self.primary_frequency)
    }

    #[must_use]
    pub fn primary_channel(&self) -> WiFiChannel {
        self.band().channel_by_frequency(self.primary_frequency)
    }

    /// Channel of the center frequency, looked up in the primary's band.
    #[must_use]
    pub fn center_channel(&self) -> WiFiChannel {
        self.band().channel_by_frequency(self.center_frequency)
    }

    /// Lower edge of the occupied spectrum.
    #[must_use]
    pub fn frequency_start(&self) -> u32 {
        self.center_frequency
            .saturating_sub(self.width.frequency_width_half())
    }

    /// Upper edge of the occupied spectrum.
    #[must_use]
    pub fn frequency_end(&self) -> u32 {
        self.center_frequency
            .saturating_add(self.width.frequency_width_half())
    }

    /// Check whether a frequency falls inside the occupied spectrum, edges included.
    #[must_use]
    pub fn in_range(&self, frequency: u32) -> bool {
        (self.frequency_start()..=self.frequency_end()).contains(&frequency)
    }

    #[must_use]
    pub fn strength(&self) -> Strength {
        Strength::calculate(self.level)
    }

    /// Approximate distance to the emitter, e.g. `"~17.4m"`.
    #[must_use]
    pub fn distance(&self) -> String {
        format!(
            "~{:.1}m",
            calculate_distance(self.primary_frequency, self.level)
        )
    }

    /// `"5"` when primary and center channel coincide, `"5(6)"` otherwise.
    #[must_use]
    pub fn channel_display(&self) -> String {
        let primary = self.primary_channel().channel;
        let center = self.center_channel().channel;
        if primary == center {
            primary.to_string()
        } else {
            format!("{primary}({center})")
        }
    }
}

impl PartialEq for WiFiSignal {
    fn eq(&self, other: &Self) -> bool {
        self.primary_frequency == other.primary_frequency && self.width == other.width
    }
}

impl Eq for WiFiSignal {}

impl Hash for WiFiSignal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.primary_frequency.hash(state);
        self.width.hash(state);
    }
}

impl PartialOrd for WiFiSignal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WiFiSignal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary_frequency
            .cmp(&other.primary_frequency)
            .then_with(|| self.width.cmp(&other.width))
    }
}

/// Estimate the distance in meters from frequency (MHz) and level (dBm).
///
/// Inverts the free-space path loss: `10 ^ ((27.55 - 20 log10(f) + |level|) / 20)`.
#[allow(clippy::float_arithmetic)]
#[must_use]
pub fn calculate_distance(frequency: u32, level: i32) -> f64 {
    let exponent =
        (DISTANCE_MHZ_M - 20.0 * f64::from(frequency).log10() + f64::from(level.unsigned_abs())) / 20.0;
    10.0_f64.powf(exponent)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::float_arithmetic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    const PRIMARY_FREQUENCY: u32 = 2432;
    const PRIMARY_CHANNEL: u32 = 5;
    const CENTER_FREQUENCY: u32 = 2437;
    const CENTER_CHANNEL: u32 = 6;
    const LEVEL: i32 = -65;

    fn fixture() -> WiFiSignal {
        WiFiSignal::new(PRIMARY_FREQUENCY, CENTER_FREQUENCY, WiFiWidth::Mhz40, LEVEL)
    }

    fn hash_of(signal: &WiFiSignal) -> u64 {
        let mut hasher = DefaultHasher::new();
        signal.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn accessors() {
        let signal = fixture();
        assert_eq!(signal.primary_frequency(), PRIMARY_FREQUENCY);
        assert_eq!(signal.center_frequency(), CENTER_FREQUENCY);
        assert_eq!(signal.level(), LEVEL);
        assert_eq!(signal.band(), WiFiBand::Ghz2);
        assert_eq!(signal.width(), WiFiWidth::Mhz40);
        assert_eq!(signal.extra(), SignalExtra::EMPTY);
    }

    #[test]
    fn channels_from_frequencies() {
        let signal = WiFiSignal::new(PRIMARY_FREQUENCY, CENTER_FREQUENCY, WiFiWidth::Mhz80, LEVEL);
        assert_eq!(signal.primary_channel().channel, PRIMARY_CHANNEL);
        assert_eq!(signal.center_channel().channel, CENTER_CHANNEL);
        assert_eq!(signal.width(), WiFiWidth::Mhz80);
    }

    #[test]
    fn frequency_edges() {
        let signal = fixture();
        let half = WiFiWidth::Mhz40.frequency_width_half();
        assert_eq!(signal.frequency_start(), CENTER_FREQUENCY - half);
        assert_eq!(signal.frequency_end(), CENTER_FREQUENCY + half);
    }

    #[test]
    fn in_range_is_inclusive_at_edges() {
        let signal = fixture();
        let half = WiFiWidth::Mhz40.frequency_width_half();
        assert!(signal.in_range(CENTER_FREQUENCY));
        assert!(signal.in_range(CENTER_FREQUENCY - half));
        assert!(signal.in_range(CENTER_FREQUENCY + half));
        assert!(!signal.in_range(CENTER_FREQUENCY - half - 1));
        assert!(!signal.in_range(CENTER_FREQUENCY + half + 1));
    }

    #[test]
    fn strength_from_level() {
        assert_eq!(fixture().strength(), Strength::Three);
    }

    #[test]
    fn distance_format() {
        let expected = format!("~{:.1}m", calculate_distance(PRIMARY_FREQUENCY, LEVEL));
        assert_eq!(fixture().distance(), expected);
        assert_eq!(fixture().distance(), "~17.4m");
    }

    #[test]
    fn distance_grows_as_level_drops() {
        assert!(calculate_distance(2437, -80) > calculate_distance(2437, -40));
        assert!(calculate_distance(5180, -60) < calculate_distance(2437, -60));
    }

    #[test]
    fn equality_uses_primary_frequency_and_width() {
        let other = WiFiSignal::new(
            PRIMARY_FREQUENCY,
            CENTER_FREQUENCY + 10,
            WiFiWidth::Mhz40,
            LEVEL + 10,
        );
        assert_eq!(fixture(), other);
        assert_eq!(hash_of(&fixture()), hash_of(&other));

        let wider = WiFiSignal::new(PRIMARY_FREQUENCY, CENTER_FREQUENCY, WiFiWidth::Mhz80, LEVEL);
        assert_ne!(fixture(), wider);
        assert!(fixture() < wider);
    }

    #[test]
    fn channel_display_when_primary_and_center_same() {
        let signal = WiFiSignal::new(PRIMARY_FREQUENCY, PRIMARY_FREQUENCY, WiFiWidth::Mhz40, LEVEL);
        assert_eq!(signal.channel_display(), "5");
    }

    #[test]
    fn channel_display_when_primary_and_center_differ() {
        assert_eq!(fixture().channel_display(), "5(6)");
    }

    #[test]
    fn standard_codes() {
        assert_eq!(WiFiStandard::from_platform_code(6), WiFiStandard::Ax);
        assert_eq!(WiFiStandard::from_platform_code(2), WiFiStandard::Unknown);
        assert_eq!(WiFiStandard::Be.to_string(), "802.11be");
    }

    fn any_width() -> impl Strategy<Value = WiFiWidth> {
        prop::sample::select(WiFiWidth::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn identity_ignores_center_and_level(
            primary in 2400u32..7200,
            center_a in 2400u32..7200,
            center_b in 2400u32..7200,
            level_a in -110i32..0,
            level_b in -110i32..0,
            width in any_width(),
        ) {
            let a = WiFiSignal::new(primary, center_a, width, level_a);
            let b = WiFiSignal::new(primary, center_b, width, level_b);
            prop_assert_eq!(a, b);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
            prop_assert_eq!(a.cmp(&b), Ordering::Equal);
        }

        #[test]
        fn in_range_matches_edges(
            center in 2400u32..7200,
            width in any_width(),
            offset in 0u32..400,
        ) {
            let signal = WiFiSignal::new(center, center, width, -50);
            let half = width.frequency_width_half();
            prop_assert_eq!(signal.in_range(center + offset), offset <= half);
        }
    }
}
