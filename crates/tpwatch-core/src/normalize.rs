// ── Live host normalization ──
//
// Turns a raw `host_info` row into a `DeviceRecord`: percent-decodes the
// fields the router escapes, replaces placeholder hostnames, and decides
// whether an offline device should already be treated as gone.

use std::net::IpAddr;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use tpwatch_api::RawHostInfo;

use crate::model::{ConnectionType, DeviceRecord, HostState, MacAddress};

/// Hostnames the router uses when it does not know a device's name.
pub const PLACEHOLDER_HOSTNAMES: [&str; 3] = ["", "---", "anonymous"];

/// Days an offline device keeps being reported before it is deprecated.
///
/// Routers flag a device offline on the briefest disconnect; the window
/// keeps presence from flapping on transient drops.
pub const DEPRECATION_GRACE_DAYS: i64 = 7;

/// `connect_date` after decoding, either a calendar day or the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDate {
    Parsed(NaiveDate),
    Invalid(String),
}

impl ConnectDate {
    /// Parse the router's two-digit-year `YY/MM/DD` form.
    pub fn parse(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw.trim(), "%y/%m/%d") {
            Ok(date) => Self::Parsed(date),
            Err(_) => Self::Invalid(raw.to_owned()),
        }
    }
}

/// Percent-decode a router field. Invalid UTF-8 is replaced, `+` is kept.
pub fn decode_field(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// The display name for a device, substituting the compact hardware
/// address for placeholder hostnames.
pub fn display_name(mac: &MacAddress, hostname: &str) -> String {
    if !mac.is_empty() && PLACEHOLDER_HOSTNAMES.contains(&hostname) {
        mac.compact()
    } else {
        hostname.to_owned()
    }
}

/// Whether a device should be treated as gone.
///
/// Online devices never are. Offline devices without a connect date
/// always are. Otherwise the device is deprecated once more than the
/// grace window has passed since midnight of its connect date; a date
/// that cannot be parsed counts as deprecated.
pub fn is_deprecated(state: HostState, connect_date: &str, now: NaiveDateTime) -> bool {
    if state == HostState::Online {
        return false;
    }
    if connect_date.is_empty() {
        return true;
    }
    match ConnectDate::parse(connect_date) {
        ConnectDate::Parsed(date) => {
            let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
                return true;
            };
            now - midnight > TimeDelta::days(DEPRECATION_GRACE_DAYS)
        }
        ConnectDate::Invalid(raw) => {
            warn!(connect_date = %raw, "unparseable connect date; treating device as deprecated");
            true
        }
    }
}

/// Normalize one live host record against the clock `now`.
///
/// Returns `None` for records without a hardware address.
pub fn normalize(raw: RawHostInfo, now: NaiveDateTime) -> Option<DeviceRecord> {
    let mac = MacAddress::new(&raw.mac);
    if mac.is_empty() {
        debug!(hostname = %raw.hostname, "dropping host record without hardware address");
        return None;
    }

    let connect_date = decode_nonempty(&raw.connect_date);
    let connect_time = decode_nonempty(&raw.connect_time);
    let ssid = decode_nonempty(&raw.ssid);

    let hostname = display_name(&mac, &raw.hostname);
    let state = HostState::from(raw.state.as_str());
    let is_deprecate = is_deprecated(state, &connect_date, now);

    Some(DeviceRecord {
        mac,
        hostname,
        ip: parse_ip(&raw.ip),
        connection_type: ConnectionType::from(raw.conn_type.as_str()),
        state,
        is_deprecate,
        up_limit: raw.up_limit,
        down_limit: raw.down_limit,
        interface: raw.interface,
        is_cur_host: raw.is_cur_host,
        connect_date,
        connect_time,
        ssid,
        extra: raw.extra,
    })
}

fn decode_nonempty(raw: &str) -> String {
    if raw.is_empty() {
        String::new()
    } else {
        decode_field(raw)
    }
}

/// Parse an IP address, silently dropping unparseable values.
pub(crate) fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}
