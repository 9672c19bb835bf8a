//! Linux provider built on the `iw` and `nmcli` command-line tools.
//!
//! - `iw dev <iface> scan trigger` starts a scan (needs `CAP_NET_ADMIN`)
//! - `iw dev <iface> scan dump` reads the cached results
//! - `iw dev <iface> link` describes the current association
//! - `iw phy` lists the frequencies the hardware can use
//! - `nmcli radio wifi [on|off]` reads and flips the radio state
//! - `rfkill list wifi` reads the radio state where NetworkManager is absent
//!
//! Parsing is done by pure functions over the command output so it can be
//! tested without a radio.

use std::process::Command;
use wifiscope_core::{ConnectionInfo, PlatformError, ScanRecord, WiFiBand, WiFiSwitch, WifiManager};

/// Run a command and return its stdout, mapping spawn failures and non-zero
/// exits to [`PlatformError`].
fn run(program: &str, args: &[&str]) -> Result<String, PlatformError> {
    tracing::debug!(program, ?args, "running provider command");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| PlatformError::Io(format!("failed to run `{program} {}`: {e}", args.join(" "))))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::Command(format!(
            "`{program} {}` exited with {}: {}",
            args.join(" "),
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// =============================================================================
// MANAGER
// =============================================================================

/// [`WifiManager`] for one wireless interface.
#[derive(Debug, Clone)]
pub struct IwManager {
    interface: String,
}

impl IwManager {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

    fn phy_frequencies(&self) -> Result<Vec<u32>, PlatformError> {
        run("iw", &["phy"]).map(|out| parse_phy_frequencies(&out))
    }
}

impl WifiManager for IwManager {
    fn is_wifi_enabled(&self) -> Result<bool, PlatformError> {
        match run("nmcli", &["radio", "wifi"]) {
            Ok(out) => parse_radio_state(&out),
            Err(PlatformError::Io(reason)) => {
                tracing::debug!(%reason, "nmcli unavailable, reading rfkill");
                parse_rfkill(&run("rfkill", &["list", "wifi"])?)
            }
            Err(e) => Err(e),
        }
    }

    fn start_scan(&self) -> Result<bool, PlatformError> {
        run("iw", &["dev", &self.interface, "scan", "trigger"]).map(|_| true)
    }

    fn scan_results(&self) -> Result<Option<Vec<ScanRecord>>, PlatformError> {
        let out = run("iw", &["dev", &self.interface, "scan", "dump"])?;
        Ok(Some(parse_iw_scan_output(&out)))
    }

    fn connection_info(&self) -> Result<Option<ConnectionInfo>, PlatformError> {
        run("iw", &["dev", &self.interface, "link"]).map(|out| parse_iw_link(&out))
    }

    fn is_5ghz_band_supported(&self) -> Result<bool, PlatformError> {
        Ok(self.phy_frequencies()?.into_iter().any(|f| WiFiBand::Ghz5.in_range(f)))
    }

    fn is_6ghz_band_supported(&self) -> Result<bool, PlatformError> {
        Ok(self.phy_frequencies()?.into_iter().any(|f| WiFiBand::Ghz6.in_range(f)))
    }

    fn is_scan_throttle_enabled(&self) -> Result<bool, PlatformError> {
        // nl80211 has no scan throttling
        Ok(false)
    }
}

/// [`WiFiSwitch`] driven by `nmcli radio wifi on|off`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NmcliSwitch;

impl WiFiSwitch for NmcliSwitch {
    fn on(&self) -> Result<bool, PlatformError> {
        run("nmcli", &["radio", "wifi", "on"]).map(|_| true)
    }

    fn off(&self) -> Result<bool, PlatformError> {
        run("nmcli", &["radio", "wifi", "off"]).map(|_| true)
    }
}

// =============================================================================
// PARSERS
// =============================================================================

/// Parse `nmcli radio wifi` output (`enabled` / `disabled`).
pub fn parse_radio_state(output: &str) -> Result<bool, PlatformError> {
    match output.trim() {
        "enabled" => Ok(true),
        "disabled" => Ok(false),
        other => Err(PlatformError::Parse(format!("unexpected radio state '{other}'"))),
    }
}

/// Parse `rfkill list wifi` output. The radio is enabled when no wireless
/// device is soft or hard blocked.
pub fn parse_rfkill(output: &str) -> Result<bool, PlatformError> {
    let blocked: Vec<&str> = output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim().split_once(':')?;
            key.ends_with("blocked").then_some(value.trim())
        })
        .collect();
    if blocked.is_empty() {
        return Err(PlatformError::Parse("rfkill lists no wireless device".to_owned()));
    }
    Ok(blocked.iter().all(|value| *value == "no"))
}

/// Decode the `\xNN` escapes `iw` prints for non-printable SSID bytes.
///
/// Decoded bytes are reassembled as UTF-8; invalid sequences become U+FFFD.
pub fn unescape_ssid(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let decoded = raw
                .get(i + 2..i + 4)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[derive(Debug, Default)]
struct Suites {
    auth: Vec<String>,
    pairwise: Vec<String>,
}

impl Suites {
    /// Capability tokens such as `[WPA2-PSK-CCMP]` for one RSN or WPA element.
    fn tokens(&self, protocol: &str) -> Vec<String> {
        let cipher = self.pairwise.join("+");
        let auths = if self.auth.is_empty() { vec![String::new()] } else { self.auth.clone() };
        auths
            .iter()
            .map(|auth| {
                let auth = match auth.as_str() {
                    "IEEE 802.1X" | "802.1X" => "EAP",
                    "SAE" => return "[RSN-SAE-CCMP]".to_owned(),
                    "OWE" => return "[RSN-OWE-CCMP]".to_owned(),
                    "" => "PSK",
                    other => other,
                };
                if cipher.is_empty() {
                    format!("[{protocol}-{auth}]")
                } else {
                    format!("[{protocol}-{auth}-{cipher}]")
                }
            })
            .collect()
    }
}

/// Fields collected from one `BSS` stanza.
#[derive(Debug, Default)]
struct BssStanza {
    bssid: String,
    ssid: String,
    frequency: u32,
    level: i32,
    ess: bool,
    privacy: bool,
    rsn: Option<Suites>,
    wpa: Option<Suites>,
    wps: bool,
    ht: bool,
    ht_offset: i32,
    vht: bool,
    vht_width: u32,
    vht_segment1: u32,
    vht_segment2: u32,
    he: bool,
    eht: bool,
}

impl BssStanza {
    fn item(&mut self, section: &str, key: &str, value: &str) {
        let list = || value.split_whitespace().map(str::to_owned).collect::<Vec<_>>();
        match (section, key) {
            ("RSN" | "WPA", "Authentication suites") => {
                // "IEEE 802.1X" is one suite spread over two words
                let auth = value.replace("IEEE 802.1X", "802.1X");
                let suites = auth.split_whitespace().map(str::to_owned).collect();
                self.suites(section).auth = suites;
            }
            ("RSN" | "WPA", "Pairwise ciphers") => self.suites(section).pairwise = list(),
            ("HT operation", "secondary channel offset") => {
                self.ht_offset = match value {
                    "above" => 10,
                    "below" => -10,
                    _ => 0,
                };
            }
            ("VHT operation", "channel width") => {
                self.vht_width = leading_number(value).unwrap_or(0);
            }
            ("VHT operation", "center freq segment 1") => {
                self.vht_segment1 = leading_number(value).unwrap_or(0);
            }
            ("VHT operation", "center freq segment 2") => {
                self.vht_segment2 = leading_number(value).unwrap_or(0);
            }
            _ => {}
        }
    }

    fn suites(&mut self, section: &str) -> &mut Suites {
        if section == "RSN" {
            self.rsn.get_or_insert_with(Suites::default)
        } else {
            self.wpa.get_or_insert_with(Suites::default)
        }
    }

    fn header(&mut self, key: &str, value: &str) {
        match key {
            "freq" => self.frequency = leading_number(value).unwrap_or(0),
            "signal" => {
                // "-52.00 dBm": the fractional part is dropped
                let number = value.split_whitespace().next().unwrap_or_default();
                let integral = number.split('.').next().unwrap_or_default();
                self.level = integral.parse().unwrap_or(wifiscope_core::strength::MIN_RSSI);
            }
            "SSID" => self.ssid = unescape_ssid(value),
            "capability" => {
                self.ess = value.split_whitespace().any(|w| w == "ESS");
                self.privacy = value.split_whitespace().any(|w| w == "Privacy");
            }
            "RSN" => {
                self.rsn.get_or_insert_with(Suites::default);
            }
            "WPA" => {
                self.wpa.get_or_insert_with(Suites::default);
            }
            "WPS" => self.wps = true,
            "HT operation" | "HT capabilities" => self.ht = true,
            "VHT operation" | "VHT capabilities" => self.vht = true,
            "HE capabilities" | "HE operation" => self.he = true,
            "EHT capabilities" | "EHT operation" => self.eht = true,
            _ => {}
        }
    }

    fn capabilities(&self) -> String {
        let mut tokens = Vec::new();
        if let Some(rsn) = &self.rsn {
            tokens.extend(rsn.tokens("WPA2"));
        }
        if let Some(wpa) = &self.wpa {
            tokens.extend(wpa.tokens("WPA"));
        }
        if self.privacy && self.rsn.is_none() && self.wpa.is_none() {
            tokens.push("[WEP]".to_owned());
        }
        if self.wps {
            tokens.push("[WPS]".to_owned());
        }
        if self.ess {
            tokens.push("[ESS]".to_owned());
        }
        tokens.concat()
    }

    /// Platform width code and center frequency.
    fn width(&self) -> (u32, u32) {
        let band = WiFiBand::find(self.frequency);
        let center = |channel: u32| band.frequency_by_channel(channel).unwrap_or(0);
        match self.vht_width {
            1 if self.vht_segment2 != 0 => (3, center(self.vht_segment2)),
            1 => (2, center(self.vht_segment1)),
            2 => (3, center(self.vht_segment1)),
            3 => (4, center(self.vht_segment1)),
            _ if self.ht_offset != 0 => (1, self.frequency.saturating_add_signed(self.ht_offset)),
            _ => (0, 0),
        }
    }

    fn standard(&self) -> u32 {
        if self.eht {
            8
        } else if self.he {
            6
        } else if self.vht {
            5
        } else if self.ht {
            4
        } else {
            1
        }
    }

    /// 802.11r: any advertised `FT/...` authentication suite.
    fn fast_roaming(&self) -> bool {
        [&self.rsn, &self.wpa]
            .into_iter()
            .flatten()
            .flat_map(|suites| &suites.auth)
            .any(|auth| auth.starts_with("FT/"))
    }

    fn into_record(self) -> ScanRecord {
        let (channel_width, center_freq0) = self.width();
        ScanRecord {
            fast_roaming: self.fast_roaming(),
            capabilities: self.capabilities(),
            channel_width,
            center_freq0,
            wifi_standard: self.standard(),
            frequency: self.frequency,
            level: self.level,
            ssid: self.ssid,
            bssid: self.bssid,
            ..ScanRecord::default()
        }
    }
}

fn leading_number(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

/// Parse `iw dev <iface> scan dump` output into raw scan records.
///
/// Each stanza starts with `BSS <mac>(on <iface>)` at column 0. Indented lines
/// are either `key: value` headers or `* key: value` items belonging to the
/// last header (RSN, HT operation, ...). Stanzas without a frequency are
/// dropped.
pub fn parse_iw_scan_output(output: &str) -> Vec<ScanRecord> {
    let mut records = Vec::new();
    let mut current: Option<BssStanza> = None;
    let mut section = String::new();

    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("BSS ") {
            records.extend(current.take().filter(|s| s.frequency != 0).map(BssStanza::into_record));
            let mac_end = rest
                .find(|c: char| !c.is_ascii_hexdigit() && c != ':')
                .unwrap_or(rest.len());
            current = Some(BssStanza {
                bssid: rest[..mac_end].to_lowercase(),
                ..BssStanza::default()
            });
            section.clear();
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim();
        if let Some(item) = trimmed.strip_prefix('*') {
            if let Some((key, value)) = item.split_once(':') {
                stanza.item(&section, key.trim(), value.trim());
            }
        } else if let Some((key, value)) = trimmed.split_once(':') {
            let key = key.trim();
            stanza.header(key, value.trim());
            section = key.to_owned();
            // "RSN:\t * Version: 1" carries its first item inline
            if let Some((item_key, item_value)) = value.trim().strip_prefix('*').and_then(|i| i.split_once(':')) {
                stanza.item(&section, item_key.trim(), item_value.trim());
            }
        }
    }

    records.extend(current.filter(|s| s.frequency != 0).map(BssStanza::into_record));
    tracing::debug!(count = records.len(), "parsed iw scan dump");
    records
}

/// Parse `iw dev <iface> link` output. `None` when not associated.
pub fn parse_iw_link(output: &str) -> Option<ConnectionInfo> {
    let mut lines = output.lines();
    let first = lines.next()?;
    let rest = first.strip_prefix("Connected to ")?;
    let bssid = rest.split_whitespace().next()?.to_lowercase();

    let mut info = ConnectionInfo {
        bssid,
        ..ConnectionInfo::default()
    };
    for line in lines {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        match key.trim() {
            "SSID" => info.ssid = unescape_ssid(value.trim()),
            "tx bitrate" => {
                let number = value.split_whitespace().next().unwrap_or_default();
                info.link_speed = number.split('.').next().and_then(|n| n.parse().ok()).unwrap_or(0);
            }
            _ => {}
        }
    }
    Some(info)
}

/// Enabled frequencies listed by `iw phy` (`* 5180 MHz [36] (20.0 dBm)`).
pub fn parse_phy_frequencies(output: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| {
            let item = line.trim().strip_prefix('*')?.trim();
            if item.contains("disabled") {
                return None;
            }
            let (number, rest) = item.split_once(' ')?;
            if !rest.starts_with("MHz") {
                return None;
            }
            // iw 5.x prints "5180.0 MHz"
            number.split('.').next()?.parse().ok()
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
