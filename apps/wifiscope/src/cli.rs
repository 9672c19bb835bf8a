//! # CLI Module
//!
//! Command-line interface for wifiscope.
//!
//! Every command is a `cmd_*` function over a [`WiFiManagerWrapper`] and a
//! [`SettingsStore`], returning the text to print. [`run`] wires them to the
//! parsed [`Cli`].

use crate::platform;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use thiserror::Error;
use wifiscope_core::{
    RedbSettingsStore, Settings, SettingsStore, SortBy, Strength, StrengthColor, StrengthFilter,
    WiFiBand, WiFiDetail, WiFiManagerWrapper, WiFiSwitch, WifiError, WifiManager,
};

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WifiError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform refused an operation.
    #[error("{0}")]
    Operation(String),
}

pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// ARGUMENTS
// =============================================================================

/// wifiscope - WiFi scan analyzer
#[derive(Debug, Parser)]
#[command(name = "wifiscope", version, about)]
pub struct Cli {
    /// Settings database path
    #[arg(long, global = true, env = "WIFISCOPE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where scan data comes from.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Read the radio state from a JSON snapshot instead of the live interface
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Wireless interface to scan; ignored with `--snapshot`
    #[arg(long, global = true, env = "WIFISCOPE_INTERFACE")]
    pub interface: Option<String>,
}

pub const DEFAULT_INTERFACE: &str = "wlan0";

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan and list access points
    Scan {
        /// Ordering (strength, ssid, channel); defaults to the saved setting
        #[arg(long, value_parser = parse_value::<SortBy>)]
        sort: Option<SortBy>,

        /// Only show one band (2.4, 5, 6); defaults to the saved setting
        #[arg(long, value_parser = parse_value::<WiFiBand>)]
        band: Option<WiFiBand>,

        /// Ignore the saved strength filter
        #[arg(long)]
        no_filter: bool,

        /// Read the latest results without requesting a new scan
        #[arg(long)]
        no_trigger: bool,

        /// Rescan every saved scan interval until interrupted
        #[arg(long)]
        watch: bool,

        /// Stop watching after this many scans
        #[arg(long, requires = "watch", value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,
    },

    /// Show radio state, capabilities and the current connection
    Status,

    /// Turn the radio on
    Enable,

    /// Turn the radio off
    Disable,

    /// Per-channel access point counts for one band
    Channels {
        /// Band to inspect (2.4, 5, 6)
        #[arg(long, default_value = "2.4", value_parser = parse_value::<WiFiBand>)]
        band: WiFiBand,
    },

    /// Manage the strength filter
    Filter {
        #[command(subcommand)]
        action: FilterAction,
    },

    /// Show or change saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum FilterAction {
    /// Flip one strength tier (0-4) in or out of the selection
    Toggle {
        #[arg(value_parser = parse_value::<Strength>)]
        tier: Strength,
    },
    /// Select every tier again
    Reset,
    /// Show the selection
    Show,
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    Show,
    Set {
        #[arg(long, value_parser = parse_value::<SortBy>)]
        sort: Option<SortBy>,

        #[arg(long, conflicts_with = "all_bands", value_parser = parse_value::<WiFiBand>)]
        band: Option<WiFiBand>,

        /// Clear the band filter
        #[arg(long)]
        all_bands: bool,

        /// Scan interval in seconds
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        interval: Option<u32>,
    },
}

/// Parse a core value through its `FromStr` impl for clap.
fn parse_value<T: FromStr<Err = WifiError>>(s: &str) -> Result<T, String> {
    s.parse().map_err(|e: WifiError| e.to_string())
}

/// Default settings location: `<config dir>/wifiscope/settings.redb`, or the
/// working directory when the platform has no config dir.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wifiscope")
        .join("settings.redb")
}

/// Write command output to stdout. Empty output prints nothing.
pub fn emit(output: &str) -> CliResult<()> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    stdout.flush()?;
    Ok(())
}

// =============================================================================
// OUTPUT VIEWS
// =============================================================================

/// One scan row as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct DetailView {
    pub ssid: String,
    pub bssid: String,
    pub channel: String,
    pub band: String,
    pub primary_frequency: u32,
    pub center_frequency: u32,
    pub width_mhz: u32,
    pub frequency_start: u32,
    pub frequency_end: u32,
    pub level: i32,
    pub strength: usize,
    pub distance: String,
    pub security: String,
    pub capabilities: String,
    pub standard: String,
    pub connected: bool,
}

impl From<&WiFiDetail> for DetailView {
    fn from(detail: &WiFiDetail) -> Self {
        let signal = &detail.signal;
        Self {
            ssid: detail.identifier.ssid_display().to_owned(),
            bssid: detail.bssid().to_owned(),
            channel: signal.channel_display(),
            band: signal.band().to_string(),
            primary_frequency: signal.primary_frequency(),
            center_frequency: signal.center_frequency(),
            width_mhz: signal.width().frequency_width(),
            frequency_start: signal.frequency_start(),
            frequency_end: signal.frequency_end(),
            level: signal.level(),
            strength: signal.strength().index(),
            distance: signal.distance(),
            security: detail.security.security().to_string(),
            capabilities: detail.security.capabilities.clone(),
            standard: signal.extra().standard.to_string(),
            connected: detail.is_connected(),
        }
    }
}

/// One scan row as printed in table mode.
#[derive(Debug, Tabled)]
struct ScanRow {
    #[tabled(rename = "*")]
    connected: &'static str,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "BSSID")]
    bssid: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "dBm")]
    level: i32,
    #[tabled(rename = "Strength")]
    bars: &'static str,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Security")]
    security: String,
    #[tabled(rename = "Standard")]
    standard: String,
}

impl From<&WiFiDetail> for ScanRow {
    fn from(detail: &WiFiDetail) -> Self {
        let signal = &detail.signal;
        Self {
            connected: if detail.is_connected() { "*" } else { "" },
            ssid: detail.identifier.ssid_display().to_owned(),
            bssid: detail.bssid().to_owned(),
            channel: signal.channel_display(),
            band: signal.band().to_string(),
            width: signal.width().to_string(),
            level: signal.level(),
            bars: signal.strength().bars(),
            distance: signal.distance(),
            security: detail.security.security().to_string(),
            standard: signal.extra().standard.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusView {
    enabled: bool,
    platform_version: u32,
    band_5ghz: bool,
    band_6ghz: bool,
    scan_throttle: bool,
    connection: Option<ConnectionView>,
}

#[derive(Debug, Serialize)]
struct ConnectionView {
    ssid: String,
    bssid: String,
    ip_address: String,
    link_speed: u32,
}

#[derive(Debug, Serialize, Tabled)]
struct TierView {
    #[tabled(rename = "Tier")]
    tier: usize,
    #[tabled(rename = "Bars")]
    #[serde(skip)]
    bars: &'static str,
    #[tabled(rename = "Selected")]
    selected: bool,
    #[tabled(rename = "Color")]
    color: &'static str,
}

#[derive(Debug, Serialize, Tabled)]
struct ChannelView {
    #[tabled(rename = "Channel")]
    channel: u32,
    #[tabled(rename = "Frequency (MHz)")]
    frequency: u32,
    #[tabled(rename = "APs")]
    access_points: usize,
}

fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn color_name(color: StrengthColor) -> &'static str {
    match color {
        StrengthColor::Error => "error",
        StrengthColor::Warning => "warning",
        StrengthColor::Success => "success",
        StrengthColor::Regular => "regular",
    }
}

fn band_name(band: Option<WiFiBand>) -> String {
    band.map_or_else(|| "all".to_owned(), |b| b.to_string())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Scan and list access points, filtered and sorted.
///
/// Arguments override the saved sort and band; the saved strength filter
/// applies unless `no_filter` is set.
pub fn cmd_scan<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
    store: &impl SettingsStore,
    sort: Option<SortBy>,
    band: Option<WiFiBand>,
    no_filter: bool,
    no_trigger: bool,
    json: bool,
) -> CliResult<String> {
    let settings = store.load()?;
    let sort_by = sort.unwrap_or(settings.sort_by);
    let band = band.or(settings.band);
    let filter = if no_filter {
        StrengthFilter::default()
    } else {
        StrengthFilter::new(settings.strengths)
    };

    if !platform.wifi_enabled() {
        tracing::warn!("WiFi radio is disabled");
        return if json {
            Ok(serde_json::to_string_pretty(&Vec::<DetailView>::new())?)
        } else {
            Ok("WiFi is disabled. Run `wifiscope enable` to turn it on.".to_owned())
        };
    }

    if !no_trigger && !platform.start_scan() {
        tracing::warn!(
            throttled = platform.is_scan_throttle_enabled(),
            "scan request refused, showing previous results"
        );
    }

    let data = platform.wifi_data();
    let details = data.filtered(&filter, sort_by, band);
    tracing::info!(
        total = data.details.len(),
        shown = details.len(),
        %sort_by,
        "scan complete"
    );

    if json {
        let views: Vec<DetailView> = details.iter().map(DetailView::from).collect();
        return Ok(serde_json::to_string_pretty(&views)?);
    }

    let mut out = format!(
        "{} of {} access points (sort: {sort_by}, band: {}{})\n",
        details.len(),
        data.details.len(),
        band_name(band),
        if filter.is_active() { ", strength filter on" } else { "" }
    );
    out.push_str(&render_table(details.iter().map(ScanRow::from)));
    out.push('\n');
    Ok(out)
}

/// Options shared by every scan of a watch loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub sort: Option<SortBy>,
    pub band: Option<WiFiBand>,
    pub no_filter: bool,
    pub no_trigger: bool,
    pub json: bool,
}

/// Rescan repeatedly, handing each rendering to `emit` and calling `pause`
/// with the saved scan interval between scans.
///
/// Settings are reloaded before every scan so interval, filter and sort
/// changes made meanwhile take effect. Stops after `count` scans when given.
/// Returns the number of scans run.
pub fn cmd_watch<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
    store: &impl SettingsStore,
    options: ScanOptions,
    count: Option<u32>,
    mut pause: impl FnMut(Duration),
    mut emit: impl FnMut(&str) -> CliResult<()>,
) -> CliResult<u32> {
    let mut scans = 0u32;
    loop {
        let interval = Duration::from_secs(store.load()?.scan_interval_secs.into());
        let output = cmd_scan(
            platform,
            store,
            options.sort,
            options.band,
            options.no_filter,
            options.no_trigger,
            options.json,
        )?;
        emit(&output)?;
        scans += 1;
        if count.is_some_and(|limit| scans >= limit) {
            return Ok(scans);
        }
        tracing::debug!(scans, interval_secs = interval.as_secs(), "waiting for next scan");
        pause(interval);
    }
}

/// Radio state, band capabilities and the current connection.
pub fn cmd_status<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
    json: bool,
) -> CliResult<String> {
    let view = StatusView {
        enabled: platform.wifi_enabled(),
        platform_version: platform.version().0,
        band_5ghz: platform.is_5ghz_band_supported(),
        band_6ghz: platform.is_6ghz_band_supported(),
        scan_throttle: platform.is_scan_throttle_enabled(),
        connection: platform.wifi_info().map(|info| ConnectionView {
            ssid: info.ssid_unquoted().to_owned(),
            bssid: info.bssid,
            ip_address: info.ip_address,
            link_speed: info.link_speed,
        }),
    };

    if json {
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let mut out = String::from("WiFi Status\n");
    out.push_str(&format!("  Enabled:        {}\n", yes_no(view.enabled)));
    out.push_str(&format!("  Platform:       {}\n", platform.version()));
    out.push_str(&format!("  5 GHz support:  {}\n", yes_no(view.band_5ghz)));
    out.push_str(&format!("  6 GHz support:  {}\n", yes_no(view.band_6ghz)));
    out.push_str(&format!("  Scan throttle:  {}\n", yes_no(view.scan_throttle)));
    match &view.connection {
        Some(c) => {
            out.push_str(&format!("  Connected to:   {} ({})\n", c.ssid, c.bssid));
            if !c.ip_address.is_empty() {
                out.push_str(&format!("  IP address:     {}\n", c.ip_address));
            }
            out.push_str(&format!("  Link speed:     {} Mbit/s\n", c.link_speed));
        }
        None => out.push_str("  Connected to:   -\n"),
    }
    Ok(out)
}

pub fn cmd_enable<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
) -> CliResult<String> {
    if platform.enable_wifi() {
        Ok("WiFi enabled".to_owned())
    } else {
        Err(CliError::Operation("failed to enable WiFi".to_owned()))
    }
}

pub fn cmd_disable<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
) -> CliResult<String> {
    if platform.disable_wifi() {
        Ok("WiFi disabled".to_owned())
    } else {
        Err(CliError::Operation("failed to disable WiFi".to_owned()))
    }
}

/// Access points overlapping each channel of `band`.
pub fn cmd_channels<M: WifiManager, S: WiFiSwitch>(
    platform: &WiFiManagerWrapper<M, S>,
    band: WiFiBand,
    json: bool,
) -> CliResult<String> {
    let data = platform.wifi_data();
    let views: Vec<ChannelView> = band
        .channels()
        .into_iter()
        .map(|channel| ChannelView {
            channel: channel.channel,
            frequency: channel.frequency,
            access_points: data
                .details
                .iter()
                .filter(|d| d.signal.band() == band && d.signal.in_range(channel.frequency))
                .count(),
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&views)?);
    }

    Ok(format!("Channels ({band})\n{}\n", render_table(views)))
}

fn render_filter(filter: &StrengthFilter, json: bool) -> CliResult<String> {
    let views: Vec<TierView> = filter
        .defaults()
        .iter()
        .map(|&tier| TierView {
            tier: tier.index(),
            bars: tier.bars(),
            selected: filter.contains(tier),
            color: color_name(filter.color(tier)),
        })
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&views)?);
    }

    Ok(format!("Strength filter\n{}\n", render_table(views)))
}

/// Flip one tier and persist the selection.
pub fn cmd_filter_toggle(store: &mut impl SettingsStore, tier: Strength, json: bool) -> CliResult<String> {
    let mut filter = StrengthFilter::new(store.load()?.strengths);
    if filter.toggle(tier) {
        filter.save(store)?;
        tracing::info!(%tier, selected = filter.contains(tier), "strength filter updated");
    } else {
        tracing::info!(%tier, "last selected tier kept");
    }
    render_filter(&filter, json)
}

pub fn cmd_filter_reset(store: &mut impl SettingsStore, json: bool) -> CliResult<String> {
    let mut filter = StrengthFilter::new(store.load()?.strengths);
    filter.reset();
    filter.save(store)?;
    render_filter(&filter, json)
}

pub fn cmd_filter_show(store: &impl SettingsStore, json: bool) -> CliResult<String> {
    render_filter(&StrengthFilter::new(store.load()?.strengths), json)
}

fn render_settings(settings: &Settings, json: bool) -> CliResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(settings)?);
    }
    let strengths: Vec<String> = settings.strengths.iter().map(ToString::to_string).collect();
    let mut out = String::from("Settings\n");
    out.push_str(&format!("  Sort by:        {}\n", settings.sort_by));
    out.push_str(&format!("  Band:           {}\n", band_name(settings.band)));
    out.push_str(&format!("  Strengths:      {}\n", strengths.join(",")));
    out.push_str(&format!("  Scan interval:  {}s\n", settings.scan_interval_secs));
    Ok(out)
}

pub fn cmd_settings_show(store: &impl SettingsStore, json: bool) -> CliResult<String> {
    render_settings(&store.load()?, json)
}

pub fn cmd_settings_set(
    store: &mut impl SettingsStore,
    sort: Option<SortBy>,
    band: Option<WiFiBand>,
    all_bands: bool,
    interval: Option<u32>,
    json: bool,
) -> CliResult<String> {
    let mut settings = store.load()?;
    if let Some(sort) = sort {
        settings.sort_by = sort;
    }
    if all_bands {
        settings.band = None;
    } else if band.is_some() {
        settings.band = band;
    }
    if let Some(interval) = interval {
        settings.scan_interval_secs = interval;
    }
    store.save(&settings)?;
    tracing::info!(?settings, "settings saved");
    render_settings(&settings, json)
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Execute a parsed command line and return the text to print.
pub fn run(cli: Cli) -> CliResult<String> {
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let interface = cli.source.interface.as_deref().unwrap_or(DEFAULT_INTERFACE);
    let snapshot = cli.source.snapshot.as_deref();
    let connect = || platform::connect(snapshot, interface);
    let json = cli.json;

    match cli.command {
        Commands::Scan {
            sort,
            band,
            no_filter,
            no_trigger,
            watch,
            count,
        } => {
            let store = RedbSettingsStore::open(&settings_path)?;
            if watch {
                let options = ScanOptions {
                    sort,
                    band,
                    no_filter,
                    no_trigger,
                    json,
                };
                cmd_watch(&connect(), &store, options, count, std::thread::sleep, emit)?;
                Ok(String::new())
            } else {
                cmd_scan(&connect(), &store, sort, band, no_filter, no_trigger, json)
            }
        }
        Commands::Status => cmd_status(&connect(), json),
        Commands::Enable => cmd_enable(&connect()),
        Commands::Disable => cmd_disable(&connect()),
        Commands::Channels { band } => cmd_channels(&connect(), band, json),
        Commands::Filter { action } => {
            let mut store = RedbSettingsStore::open(&settings_path)?;
            match action {
                FilterAction::Toggle { tier } => cmd_filter_toggle(&mut store, tier, json),
                FilterAction::Reset => cmd_filter_reset(&mut store, json),
                FilterAction::Show => cmd_filter_show(&store, json),
            }
        }
        Commands::Settings { action } => {
            let mut store = RedbSettingsStore::open(&settings_path)?;
            match action {
                SettingsAction::Show => cmd_settings_show(&store, json),
                SettingsAction::Set {
                    sort,
                    band,
                    all_bands,
                    interval,
                } => cmd_settings_set(&mut store, sort, band, all_bands, interval, json),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
