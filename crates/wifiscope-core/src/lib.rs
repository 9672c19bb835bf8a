//! # wifiscope-core
//!
//! Domain model for WiFi scan analysis.
//!
//! This crate turns raw platform scan records into immutable [`WiFiDetail`]
//! values and provides the math around them:
//!
//! - Frequency to channel mapping per band ([`WiFiBand`], [`WiFiChannel`])
//! - Width-based range arithmetic ([`WiFiWidth`], [`WiFiSignal::in_range`])
//! - Strength tiers and distance estimates ([`Strength`], [`calculate_distance`])
//! - Multi-key orderings for scan lists ([`sort_by_channel`], [`SortBy`])
//! - A fault-tolerant facade over the platform WiFi API ([`WiFiManagerWrapper`])
//!
//! Everything here is synchronous and side-effect free apart from the
//! settings store, which persists user preferences in a redb file.

pub mod band;
pub mod detail;
pub mod error;
pub mod filter;
pub mod manager;
pub mod settings;
pub mod signal;
pub mod sort;
pub mod strength;
pub mod transform;
pub mod width;

pub use band::{ChannelRange, WiFiBand, WiFiChannel};
pub use detail::{Security, WiFiAdditional, WiFiDetail, WiFiIdentifier, WiFiSecurity};
pub use error::{PlatformError, Result, WifiError};
pub use filter::StrengthFilter;
pub use manager::{PlatformVersion, WiFiManagerWrapper, WiFiSwitch, WifiManager};
pub use settings::{MemorySettingsStore, RedbSettingsStore, Settings, SettingsStore};
pub use signal::{SignalExtra, WiFiSignal, WiFiStandard, calculate_distance};
pub use sort::{SortBy, sort_by_channel, sort_by_ssid, sort_by_strength};
pub use strength::{Strength, StrengthColor};
pub use transform::{ConnectionInfo, ScanRecord, Transformer, WiFiData};
pub use width::WiFiWidth;
