// ── Device domain types ──

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// The exchange type between every stage of a poll cycle.
pub type DeviceMap = BTreeMap<MacAddress, DeviceRecord>;

/// How the device is attached to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Wired,
    Wireless,
    Unknown,
}

impl From<&str> for ConnectionType {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wired" => Self::Wired,
            "wireless" => Self::Wireless,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wired => "wired",
            Self::Wireless => "wireless",
            Self::Unknown => "unknown",
        })
    }
}

/// Router-reported link state. Anything other than `online` is offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostState {
    Online,
    Offline,
}

impl From<&str> for HostState {
    fn from(raw: &str) -> Self {
        if raw == "online" {
            Self::Online
        } else {
            Self::Offline
        }
    }
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

/// One device as reported downstream.
///
/// Serializes with the router's own field names, so the record doubles
/// as the attribute mapping handed to a [`DeviceSink`](crate::DeviceSink).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub mac: MacAddress,
    /// Display name.
    pub hostname: String,
    pub ip: Option<IpAddr>,
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    pub state: HostState,
    /// Treated as gone: offline for longer than the grace window.
    pub is_deprecate: bool,
    pub up_limit: u64,
    pub down_limit: u64,
    pub interface: String,
    pub is_cur_host: bool,
    pub connect_date: String,
    pub connect_time: String,
    pub ssid: String,
    /// Router fields without a dedicated slot, passed through as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceRecord {
    pub fn is_online(&self) -> bool {
        self.state == HostState::Online
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn connection_type_parsing() {
        assert_eq!(ConnectionType::from("wired"), ConnectionType::Wired);
        assert_eq!(ConnectionType::from("WIRELESS"), ConnectionType::Wireless);
        assert_eq!(ConnectionType::from("vpn"), ConnectionType::Unknown);
    }

    #[test]
    fn only_online_is_online() {
        assert_eq!(HostState::from("online"), HostState::Online);
        assert_eq!(HostState::from("offline"), HostState::Offline);
        assert_eq!(HostState::from(""), HostState::Offline);
    }

    #[test]
    fn record_serializes_with_router_field_names() {
        let record = DeviceRecord {
            mac: MacAddress::new("AA-BB-CC-DD-EE-FF"),
            hostname: "printer".into(),
            ip: "192.168.1.20".parse().ok(),
            connection_type: ConnectionType::Wired,
            state: HostState::Offline,
            is_deprecate: false,
            up_limit: 0,
            down_limit: 0,
            interface: "br-lan".into(),
            is_cur_host: false,
            connect_date: String::new(),
            connect_time: String::new(),
            ssid: String::new(),
            extra: serde_json::Map::new(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["mac"], json!("AA-BB-CC-DD-EE-FF"));
        assert_eq!(value["type"], json!("wired"));
        assert_eq!(value["state"], json!("offline"));
        assert_eq!(value["ip"], json!("192.168.1.20"));
    }
}
