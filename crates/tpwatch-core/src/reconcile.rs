// ── Live / reservation merge ──
//
// Reservation notes are the user-maintained names for devices, so they win
// over whatever the client announced. A reserved device that is not in the
// live table is still reported, as an offline wired record.

use std::collections::HashMap;

use tracing::debug;

use tpwatch_api::DhcpStaticEntry;

use crate::model::{ConnectionType, DeviceMap, DeviceRecord, HostState, MacAddress};
use crate::normalize::parse_ip;

/// Interface assigned to synthesized records.
pub const DEFAULT_LAN_INTERFACE: &str = "br-lan";

/// Merge the static reservations into the live device map.
///
/// A non-empty note overrides the display name of a live device. Reserved
/// devices absent from the live map are synthesized with [`synthesize`].
pub fn merge(mut live: DeviceMap, reservations: &HashMap<String, DhcpStaticEntry>) -> DeviceMap {
    for (raw_mac, entry) in reservations {
        let mac = MacAddress::new(raw_mac);
        if mac.is_empty() {
            continue;
        }

        match live.get_mut(&mac) {
            Some(record) => {
                if !entry.note.is_empty() {
                    record.hostname.clone_from(&entry.note);
                }
            }
            None => {
                debug!(mac = %mac, note = %entry.note, "synthesizing reserved device");
                let record = synthesize(mac.clone(), entry);
                live.insert(mac, record);
            }
        }
    }
    live
}

/// Build the offline record for a reserved device the router is not reporting.
///
/// An empty note falls back to the compact hardware address, as for
/// placeholder hostnames in the live table.
pub fn synthesize(mac: MacAddress, entry: &DhcpStaticEntry) -> DeviceRecord {
    let hostname = if entry.note.is_empty() {
        mac.compact()
    } else {
        entry.note.clone()
    };

    DeviceRecord {
        mac,
        hostname,
        ip: parse_ip(&entry.ip),
        connection_type: ConnectionType::Wired,
        state: HostState::Offline,
        is_deprecate: false,
        up_limit: 0,
        down_limit: 0,
        interface: DEFAULT_LAN_INTERFACE.into(),
        is_cur_host: false,
        connect_date: String::new(),
        connect_time: String::new(),
        ssid: String::new(),
        extra: serde_json::Map::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn reservation(mac: &str, ip: &str, note: &str) -> (String, DhcpStaticEntry) {
        (
            mac.to_owned(),
            DhcpStaticEntry {
                mac: mac.into(),
                ip: ip.into(),
                note: note.into(),
                ..DhcpStaticEntry::default()
            },
        )
    }

    fn live_device(mac: &str, hostname: &str) -> DeviceRecord {
        DeviceRecord {
            mac: MacAddress::new(mac),
            hostname: hostname.into(),
            ip: "192.168.1.50".parse().ok(),
            connection_type: ConnectionType::Wireless,
            state: HostState::Online,
            is_deprecate: false,
            up_limit: 100,
            down_limit: 200,
            interface: "wlan0".into(),
            is_cur_host: false,
            connect_date: "24/06/15".into(),
            connect_time: "10:00:00".into(),
            ssid: "Home".into(),
            extra: serde_json::Map::new(),
        }
    }

    fn live_map(devices: Vec<DeviceRecord>) -> DeviceMap {
        devices.into_iter().map(|d| (d.mac.clone(), d)).collect()
    }

    #[test]
    fn note_overrides_live_name() {
        let live = live_map(vec![live_device("AA-BB-CC-DD-EE-01", "android-1234")]);
        let reservations = HashMap::from([reservation("AA-BB-CC-DD-EE-01", "192.168.1.50", "Alice phone")]);

        let merged = merge(live, &reservations);
        let record = &merged[&MacAddress::new("AA-BB-CC-DD-EE-01")];
        assert_eq!(record.hostname, "Alice phone");
        assert_eq!(record.state, HostState::Online);
        assert_eq!(record.up_limit, 100);
    }

    #[test]
    fn empty_note_keeps_live_name() {
        let live = live_map(vec![live_device("AA-BB-CC-DD-EE-01", "laptop")]);
        let reservations = HashMap::from([reservation("AA-BB-CC-DD-EE-01", "192.168.1.50", "")]);

        let merged = merge(live, &reservations);
        assert_eq!(merged[&MacAddress::new("AA-BB-CC-DD-EE-01")].hostname, "laptop");
    }

    #[test]
    fn absent_reservation_is_synthesized_offline() {
        let reservations = HashMap::from([reservation("AA-BB-CC-DD-EE-02", "192.168.1.20", "printer")]);

        let merged = merge(DeviceMap::new(), &reservations);
        let record = &merged[&MacAddress::new("AA-BB-CC-DD-EE-02")];
        assert_eq!(record.hostname, "printer");
        assert_eq!(record.ip, Some("192.168.1.20".parse().unwrap()));
        assert_eq!(record.connection_type, ConnectionType::Wired);
        assert_eq!(record.state, HostState::Offline);
        assert_eq!(record.interface, DEFAULT_LAN_INTERFACE);
        assert_eq!((record.up_limit, record.down_limit), (0, 0));
        assert!(!record.is_cur_host);
        assert!(!record.is_deprecate);
    }

    #[test]
    fn synthesized_empty_note_uses_compact_mac() {
        let (_, entry) = reservation("AA-BB-CC-DD-EE-03", "192.168.1.30", "");
        let record = synthesize(MacAddress::new("AA-BB-CC-DD-EE-03"), &entry);
        assert_eq!(record.hostname, "AABBCCDDEE03");
    }

    #[test]
    fn reservation_keys_are_normalized_before_lookup() {
        let live = live_map(vec![live_device("AA-BB-CC-DD-EE-04", "tv")]);
        let reservations = HashMap::from([reservation("aa:bb:cc:dd:ee:04", "192.168.1.40", "Living room TV")]);

        let merged = merge(live, &reservations);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[&MacAddress::new("AA-BB-CC-DD-EE-04")].hostname, "Living room TV");
    }

    #[test]
    fn live_devices_without_reservation_are_untouched() {
        let device = live_device("AA-BB-CC-DD-EE-05", "tablet");
        let live = live_map(vec![device.clone()]);

        let merged = merge(live, &HashMap::new());
        assert_eq!(merged[&device.mac], device);
    }
}
