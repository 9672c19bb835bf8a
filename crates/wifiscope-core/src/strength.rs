//! # Strength Module
//!
//! Ordinal signal strength tiers derived from a level in dBm.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WifiError;

/// Levels at or below this are tier zero.
pub const MIN_RSSI: i32 = -100;

/// Levels at or above this are the top tier.
pub const MAX_RSSI: i32 = -55;

/// Display color class of a strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrengthColor {
    Error,
    Warning,
    Success,
    Regular,
}

impl StrengthColor {
    /// Color used for tiers that are not selected in a filter.
    pub const DEFAULT: Self = Self::Regular;
}

/// Signal strength tier, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strength {
    Zero,
    One,
    Two,
    Three,
    Four,
}

impl Strength {
    /// Every tier in ascending order.
    pub const ALL: [Self; 5] = [Self::Zero, Self::One, Self::Two, Self::Three, Self::Four];

    /// Bucket a signal level (dBm) into a tier.
    ///
    /// Linear between [`MIN_RSSI`] and [`MAX_RSSI`], integer division.
    #[must_use]
    pub fn calculate(level: i32) -> Self {
        let top = (Self::ALL.len() - 1) as i32;
        let index = if level <= MIN_RSSI {
            0
        } else if level >= MAX_RSSI {
            top
        } else {
            (level - MIN_RSSI) * top / (MAX_RSSI - MIN_RSSI)
        };
        Self::from_index(index as usize)
    }

    fn from_index(index: usize) -> Self {
        Self::ALL
            .get(index)
            .copied()
            .unwrap_or(Self::Four)
    }

    /// Zero-based position of this tier.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[must_use]
    pub fn color(&self) -> StrengthColor {
        match self {
            Self::Zero | Self::One => StrengthColor::Error,
            Self::Two => StrengthColor::Warning,
            Self::Three | Self::Four => StrengthColor::Success,
        }
    }

    /// True for the weakest tier only.
    #[must_use]
    pub fn weak(&self) -> bool {
        *self == Self::Zero
    }

    /// Signal bars for terminal output.
    #[must_use]
    pub fn bars(&self) -> &'static str {
        match self {
            Self::Zero => "▁___",
            Self::One => "▁▂__",
            Self::Two => "▁▂▃_",
            Self::Three => "▁▂▃▅",
            Self::Four => "▁▂▃▇",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl FromStr for Strength {
    type Err = WifiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "zero" => Ok(Self::Zero),
            "1" | "one" => Ok(Self::One),
            "2" | "two" => Ok(Self::Two),
            "3" | "three" => Ok(Self::Three),
            "4" | "four" => Ok(Self::Four),
            other => Err(WifiError::Parse(format!("unknown strength tier '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_boundaries() {
        assert_eq!(Strength::calculate(-100), Strength::Zero);
        assert_eq!(Strength::calculate(-120), Strength::Zero);
        assert_eq!(Strength::calculate(-55), Strength::Four);
        assert_eq!(Strength::calculate(-20), Strength::Four);
    }

    #[test]
    fn calculate_linear_buckets() {
        assert_eq!(Strength::calculate(-89), Strength::Zero);
        assert_eq!(Strength::calculate(-88), Strength::One);
        assert_eq!(Strength::calculate(-77), Strength::Two);
        assert_eq!(Strength::calculate(-65), Strength::Three);
        assert_eq!(Strength::calculate(-56), Strength::Three);
    }

    #[test]
    fn colors() {
        assert_eq!(Strength::Zero.color(), StrengthColor::Error);
        assert_eq!(Strength::One.color(), StrengthColor::Error);
        assert_eq!(Strength::Two.color(), StrengthColor::Warning);
        assert_eq!(Strength::Three.color(), StrengthColor::Success);
        assert_eq!(Strength::Four.color(), StrengthColor::Success);
    }

    #[test]
    fn only_zero_is_weak() {
        assert!(Strength::Zero.weak());
        assert!(Strength::ALL.iter().skip(1).all(|s| !s.weak()));
    }

    #[test]
    fn parse_tiers() {
        assert_eq!("2".parse::<Strength>().ok(), Some(Strength::Two));
        assert_eq!("Four".parse::<Strength>().ok(), Some(Strength::Four));
        assert!("5".parse::<Strength>().is_err());
    }
}
