//! # Band Module
//!
//! Frequency bands and the frequency <-> channel tables for each of them.
//!
//! Channels inside a [`ChannelRange`] are spaced 5 MHz apart, so the channel
//! for a frequency is the nearest 5 MHz step from the range's first channel.
//! A frequency that falls outside every range of its band maps to
//! [`WiFiChannel::UNKNOWN`].

use crate::error::WifiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Spacing between adjacent channel numbers, in MHz.
pub const FREQUENCY_SPREAD: u32 = 5;

// =============================================================================
// CHANNEL
// =============================================================================

/// A channel number paired with its frequency in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WiFiChannel {
    pub channel: u32,
    pub frequency: u32,
}

impl WiFiChannel {
    /// Sentinel for frequencies outside every known channel range.
    pub const UNKNOWN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(channel: u32, frequency: u32) -> Self {
        Self { channel, frequency }
    }

    /// Check whether this is the [`WiFiChannel::UNKNOWN`] sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Display for WiFiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.channel)
    }
}

/// A contiguous run of channels, `first..=last`, 5 MHz per channel number.
///
/// `step` is the channel-number stride between the standard channel centers
/// listed by [`WiFiBand::channels`]; lookups by frequency accept every
/// channel number inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub first: WiFiChannel,
    pub last: WiFiChannel,
    pub step: u32,
}

impl ChannelRange {
    const fn new(first: WiFiChannel, last: WiFiChannel, step: u32) -> Self {
        Self { first, last, step }
    }

    /// A range holding exactly one channel.
    const fn single(channel: WiFiChannel) -> Self {
        Self::new(channel, channel, 1)
    }

    /// Map a frequency to the nearest channel in this range.
    ///
    /// Returns `None` when the nearest channel number lies outside the range.
    #[must_use]
    pub fn channel_by_frequency(&self, frequency: u32) -> Option<WiFiChannel> {
        let offset = i64::from(frequency) - i64::from(self.first.frequency);
        // Nearest step, rounding half up
        let channel = i64::from(self.first.channel)
            + (offset + i64::from(FREQUENCY_SPREAD / 2)).div_euclid(i64::from(FREQUENCY_SPREAD));

        let bounds = i64::from(self.first.channel)..=i64::from(self.last.channel);
        if bounds.contains(&channel) {
            Some(WiFiChannel::new(channel as u32, frequency))
        } else {
            None
        }
    }

    /// Map a channel number back to its center frequency.
    #[must_use]
    pub fn frequency_by_channel(&self, channel: u32) -> Option<u32> {
        if (self.first.channel..=self.last.channel).contains(&channel) {
            Some(self.first.frequency + (channel - self.first.channel) * FREQUENCY_SPREAD)
        } else {
            None
        }
    }

    fn channels(&self) -> impl Iterator<Item = WiFiChannel> + '_ {
        (self.first.channel..=self.last.channel)
            .step_by(self.step.max(1) as usize)
            .filter_map(|channel| {
                self.frequency_by_channel(channel)
                    .map(|frequency| WiFiChannel::new(channel, frequency))
            })
    }
}

// =============================================================================
// CHANNEL TABLES
// =============================================================================

const GHZ2_RANGES: [ChannelRange; 2] = [
    ChannelRange::new(WiFiChannel::new(1, 2412), WiFiChannel::new(13, 2472), 1),
    ChannelRange::single(WiFiChannel::new(14, 2484)),
];

const GHZ5_RANGES: [ChannelRange; 3] = [
    ChannelRange::new(WiFiChannel::new(32, 5160), WiFiChannel::new(68, 5340), 4),
    ChannelRange::new(WiFiChannel::new(96, 5480), WiFiChannel::new(144, 5720), 4),
    ChannelRange::new(WiFiChannel::new(149, 5745), WiFiChannel::new(177, 5885), 4),
];

const GHZ6_RANGES: [ChannelRange; 2] = [
    ChannelRange::single(WiFiChannel::new(2, 5935)),
    ChannelRange::new(WiFiChannel::new(1, 5955), WiFiChannel::new(233, 7115), 4),
];

// =============================================================================
// BAND
// =============================================================================

/// The WiFi frequency band of an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WiFiBand {
    /// 2.4 GHz (channels 1-14)
    Ghz2,
    /// 5 GHz (channels 32-177)
    Ghz5,
    /// 6 GHz (channels 1-233)
    Ghz6,
}

impl WiFiBand {
    pub const ALL: [Self; 3] = [Self::Ghz2, Self::Ghz5, Self::Ghz6];

    /// Classify a frequency. Frequencies outside every band fall back to 2.4 GHz.
    #[must_use]
    pub fn find(frequency: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| band.in_range(frequency))
            .unwrap_or(Self::Ghz2)
    }

    /// Inclusive frequency span of this band, in MHz.
    #[must_use]
    pub fn frequency_range(&self) -> RangeInclusive<u32> {
        match self {
            Self::Ghz2 => 2400..=2499,
            Self::Ghz5 => 4900..=5899,
            Self::Ghz6 => 5925..=7125,
        }
    }

    /// Check if a frequency lies inside this band.
    #[must_use]
    pub fn in_range(&self, frequency: u32) -> bool {
        self.frequency_range().contains(&frequency)
    }

    /// The channel ranges defined for this band.
    #[must_use]
    pub fn channel_ranges(&self) -> &'static [ChannelRange] {
        match self {
            Self::Ghz2 => &GHZ2_RANGES,
            Self::Ghz5 => &GHZ5_RANGES,
            Self::Ghz6 => &GHZ6_RANGES,
        }
    }

    /// Map a frequency to a channel of this band.
    ///
    /// Returns [`WiFiChannel::UNKNOWN`] when the frequency is outside the band
    /// or matches none of its channel ranges.
    #[must_use]
    pub fn channel_by_frequency(&self, frequency: u32) -> WiFiChannel {
        if !self.in_range(frequency) {
            return WiFiChannel::UNKNOWN;
        }
        self.channel_ranges()
            .iter()
            .find_map(|range| range.channel_by_frequency(frequency))
            .unwrap_or(WiFiChannel::UNKNOWN)
    }

    /// Map a channel number of this band to its center frequency.
    #[must_use]
    pub fn frequency_by_channel(&self, channel: u32) -> Option<u32> {
        self.channel_ranges()
            .iter()
            .find_map(|range| range.frequency_by_channel(channel))
    }

    /// All standard channels of this band, ascending by channel number.
    #[must_use]
    pub fn channels(&self) -> Vec<WiFiChannel> {
        let mut channels: Vec<WiFiChannel> = self
            .channel_ranges()
            .iter()
            .flat_map(|range| range.channels())
            .collect();
        channels.sort();
        channels
    }

    /// Short label used in tables.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ghz2 => "2.4",
            Self::Ghz5 => "5",
            Self::Ghz6 => "6",
        }
    }
}

impl fmt::Display for WiFiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} GHz", self.label())
    }
}

impl FromStr for WiFiBand {
    type Err = WifiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let value = normalized.trim_end_matches("ghz").trim();
        match value {
            "2" | "2.4" => Ok(Self::Ghz2),
            "5" => Ok(Self::Ghz5),
            "6" => Ok(Self::Ghz6),
            _ => Err(WifiError::InvalidBand(s.to_owned())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
