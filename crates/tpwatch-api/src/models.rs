// Router API response types
//
// The router's JSON is loosely typed: the same field can arrive as a string
// on one firmware and a number on another, and table rows are wrapped in
// single-key objects whose key carries no meaning. Envelopes are decoded
// strictly (a missing table is an empty response); rows are decoded
// leniently and skipped individually when they cannot be read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::transport::JsonObject;

/// Row cap requested from the static-reservation table (`start..=end`).
pub const STATIC_TABLE_START: u32 = 0;
pub const STATIC_TABLE_END: u32 = 199;

pub(crate) const HOST_TABLE: &str = "host_management.host_info";
pub(crate) const STATIC_TABLE: &str = "dhcpd.dhcp_static";

// ── Login ────────────────────────────────────────────────────────────

/// Reply to `{"method":"do","login":{..}}`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub stok: String,
    #[serde(default)]
    pub error_code: Option<Value>,
}

// ── Table envelopes ──────────────────────────────────────────────────

/// `{"host_management": {"host_info": [ {"host_info_1": {..}}, .. ]}}`
#[derive(Debug, Deserialize)]
pub struct HostTableResponse {
    pub host_management: HostTable,
}

#[derive(Debug, Deserialize)]
pub struct HostTable {
    pub host_info: Vec<Value>,
}

/// `{"dhcpd": {"dhcp_static": [ {"dhcp_static_1": {..}}, .. ]}}`
#[derive(Debug, Deserialize)]
pub struct StaticTableResponse {
    pub dhcpd: StaticTable,
}

#[derive(Debug, Deserialize)]
pub struct StaticTable {
    pub dhcp_static: Vec<Value>,
}

impl HostTableResponse {
    pub(crate) fn decode(map: JsonObject) -> Result<Vec<RawHostInfo>, Error> {
        let envelope: Self = serde_json::from_value(Value::Object(map))
            .map_err(|_| Error::EmptyResponse { table: HOST_TABLE })?;
        Ok(unwrap_rows(envelope.host_management.host_info, HOST_TABLE))
    }
}

impl StaticTableResponse {
    pub(crate) fn decode(map: JsonObject) -> Result<Vec<DhcpStaticEntry>, Error> {
        let envelope: Self = serde_json::from_value(Value::Object(map))
            .map_err(|_| Error::EmptyResponse { table: STATIC_TABLE })?;
        Ok(unwrap_rows(envelope.dhcpd.dhcp_static, STATIC_TABLE))
    }
}

/// Unwrap `[{"<any key>": record}, ..]` into decoded records.
///
/// Rows that are not objects, and records that fail to decode, are logged
/// and skipped so one odd entry never costs the whole table.
pub fn unwrap_rows<T: DeserializeOwned>(rows: Vec<Value>, table: &str) -> Vec<T> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Value::Object(wrapper) = row else {
            warn!(table, "skipping table row that is not an object");
            continue;
        };
        for (key, record) in wrapper {
            match serde_json::from_value::<T>(record) {
                Ok(decoded) => out.push(decoded),
                Err(e) => warn!(table, key = %key, error = %e, "skipping undecodable record"),
            }
        }
    }
    out
}

// ── Live host ────────────────────────────────────────────────────────

/// One entry of the live host table, as the router reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHostInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mac: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hostname: String,
    /// `wired` or `wireless`.
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub conn_type: String,
    /// `online` or `offline`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub up_limit: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub down_limit: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interface: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_cur_host: bool,
    /// Percent-encoded `YY/MM/DD`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub connect_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub connect_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ssid: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Static reservation ───────────────────────────────────────────────

/// One DHCP static lease from the `dhcp_static` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhcpStaticEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mac: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip: String,
    /// Administrator label for the lease.
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Lenient field decoders ───────────────────────────────────────────

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_u64().is_some_and(|v| v != 0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "yes" | "on"),
        _ => false,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn host_info_accepts_mixed_field_types() {
        let raw: RawHostInfo = serde_json::from_value(json!({
            "mac": "AA-BB-CC-DD-EE-FF",
            "hostname": "laptop",
            "type": "wireless",
            "state": "online",
            "up_limit": "1024",
            "down_limit": 2048,
            "is_cur_host": "1",
            "interface": "br-lan",
            "rssi": -52
        }))
        .unwrap();

        assert_eq!(raw.conn_type, "wireless");
        assert_eq!(raw.up_limit, 1024);
        assert_eq!(raw.down_limit, 2048);
        assert!(raw.is_cur_host);
        assert_eq!(raw.extra.get("rssi"), Some(&json!(-52)));
    }

    #[test]
    fn null_and_missing_fields_default() {
        let raw: RawHostInfo = serde_json::from_value(json!({ "mac": null })).unwrap();
        assert_eq!(raw, RawHostInfo::default());
    }

    #[test]
    fn host_table_unwraps_single_key_rows() {
        let map = object(json!({
            "host_management": {
                "host_info": [
                    { "host_info_1": { "mac": "AA-BB-CC-DD-EE-01", "state": "online" } },
                    "garbage",
                    { "host_info_2": { "mac": "AA-BB-CC-DD-EE-02", "state": "offline" } }
                ]
            },
            "error_code": 0
        }));

        let rows = HostTableResponse::decode(map).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mac, "AA-BB-CC-DD-EE-01");
        assert_eq!(rows[1].state, "offline");
    }

    #[test]
    fn missing_envelope_is_empty_response() {
        let err = HostTableResponse::decode(object(json!({ "error_code": -40401 }))).unwrap_err();
        assert!(matches!(err, Error::EmptyResponse { table } if table == HOST_TABLE));

        let err = StaticTableResponse::decode(JsonObject::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyResponse { table } if table == STATIC_TABLE));
    }

    #[test]
    fn static_table_decodes_notes() {
        let map = object(json!({
            "dhcpd": {
                "dhcp_static": [
                    { "dhcp_static_1": { "mac": "AA-BB-CC-DD-EE-FF", "ip": "192.168.1.20", "note": "printer", "enable": "on" } }
                ]
            }
        }));

        let rows = StaticTableResponse::decode(map).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].note, "printer");
        assert_eq!(rows[0].extra.get("enable"), Some(&json!("on")));
    }

    #[test]
    fn login_response_without_stok_is_empty() {
        let login: LoginResponse = serde_json::from_value(json!({})).unwrap();
        assert!(login.stok.is_empty());
        assert!(login.error_code.is_none());
    }
}
