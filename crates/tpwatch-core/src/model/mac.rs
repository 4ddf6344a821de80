// ── Hardware address ──
//
// The join key between the live host table, the static-reservation table,
// and everything reported downstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, normalized to upper-case dash-separated form (AA-BB-CC-DD-EE-FF).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Create a normalized MAC address.
    /// Accepts dash-separated or colon-separated input in either case.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_uppercase().replace(':', "-");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The address without separators (`AABBCCDDEEFF`), used as device id.
    pub fn compact(&self) -> String {
        self.0.replace('-', "")
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for MacAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_keeps_router_format() {
        let mac = MacAddress::new("AA-BB-CC-DD-EE-FF");
        assert_eq!(mac.as_str(), "AA-BB-CC-DD-EE-FF");
    }

    #[test]
    fn mac_address_normalizes_colons_and_case() {
        let mac = MacAddress::new("aa:bb:cc:dd:ee:ff");
        assert_eq!(mac.as_str(), "AA-BB-CC-DD-EE-FF");
    }

    #[test]
    fn mac_address_compact() {
        let mac: MacAddress = "aa-bb-cc-dd-ee-ff".parse().unwrap();
        assert_eq!(mac.compact(), "AABBCCDDEEFF");
    }

    #[test]
    fn mac_address_serde_roundtrip_normalizes() {
        let mac: MacAddress = serde_json::from_str("\"11:22:33:44:55:66\"").unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"11-22-33-44-55-66\"");
    }

    #[test]
    fn blank_mac_is_empty() {
        assert!(MacAddress::new("  ").is_empty());
    }
}
