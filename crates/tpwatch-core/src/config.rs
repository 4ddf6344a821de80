// ── Runtime configuration ──
//
// Describes *how* to reach one router and how often to poll it. Carries
// credential data but never touches disk; `tpwatch-config` builds it.

use std::time::Duration;

use secrecy::SecretString;
use tpwatch_api::{Credentials, TransportConfig};

/// Poll period used when none is configured.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for tracking devices behind a single router.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Router address, `192.168.1.1` or `192.168.1.1:8080`.
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Time between poll cycles.
    pub scan_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".into(),
            username: "admin".into(),
            password: SecretString::from(String::new()),
            timeout: Duration::from_secs(30),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }
}

impl TrackerConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::default()
        }
    }
}
