// ── Poll cycle ──
//
// One reconciliation against the router: session, live hosts, static
// reservations, merge. The `Result` flavour feeds the CLI's exit codes;
// the plain flavour is the contract the scanner runs on, where any
// failure is an empty map.

use chrono::Local;
use tracing::{debug, error, info, warn};

use tpwatch_api::RouterClient;

use crate::config::TrackerConfig;
use crate::error::CoreError;
use crate::model::DeviceMap;
use crate::normalize::normalize;
use crate::reconcile::merge;

/// Device tracker for a single router.
#[derive(Debug)]
pub struct Tracker {
    client: RouterClient,
}

impl Tracker {
    /// Build a tracker from resolved configuration. Does not contact the router.
    pub fn new(config: &TrackerConfig) -> Result<Self, CoreError> {
        let client = RouterClient::new(&config.host, config.credentials(), &config.transport())?;
        Ok(Self { client })
    }

    /// Wrap an already-configured client.
    pub fn with_client(client: RouterClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RouterClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut RouterClient {
        &mut self.client
    }

    // ── Live hosts ───────────────────────────────────────────────────

    async fn try_fetch_live_hosts(&mut self) -> Result<DeviceMap, CoreError> {
        let rows = self.client.host_table().await?;
        let now = Local::now().naive_local();
        let total = rows.len();

        let live: DeviceMap = rows
            .into_iter()
            .filter_map(|raw| normalize(raw, now))
            .map(|record| (record.mac.clone(), record))
            .collect();

        debug!(rows = total, devices = live.len(), "live host table normalized");
        Ok(live)
    }

    /// The normalized live host table, or an empty map on any failure.
    pub async fn fetch_live_hosts(&mut self) -> DeviceMap {
        match self.try_fetch_live_hosts().await {
            Ok(live) => live,
            Err(e) => {
                error!(host = %self.client.host(), error = %e, "failed to fetch live hosts");
                DeviceMap::new()
            }
        }
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Run one poll cycle, reporting why it failed.
    pub async fn try_get_host_info(&mut self) -> Result<DeviceMap, CoreError> {
        self.client.require_session().await?;
        let live = self.try_fetch_live_hosts().await?;

        if self.client.reservations().is_empty() && self.client.is_authenticated() {
            if let Err(e) = self.client.refresh_reservations().await {
                warn!(error = %e, "static reservations unavailable; merging without them");
            }
        }

        let live_count = live.len();
        let merged = merge(live, self.client.reservations());
        info!(
            live = live_count,
            reserved = self.client.reservations().len(),
            devices = merged.len(),
            "poll cycle complete"
        );
        Ok(merged)
    }

    /// Run one poll cycle. Any failure yields an empty map.
    pub async fn get_host_info(&mut self) -> DeviceMap {
        match self.try_get_host_info().await {
            Ok(devices) => devices,
            Err(e) => {
                error!(host = %self.client.host(), error = %e, "poll cycle failed");
                DeviceMap::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn tracker_from_config_is_unauthenticated() {
        let config = TrackerConfig {
            host: "10.0.0.1:8080".into(),
            password: SecretString::from("pw".to_owned()),
            ..TrackerConfig::default()
        };
        let tracker = Tracker::new(&config).unwrap();
        assert_eq!(tracker.client().host(), "10.0.0.1:8080");
        assert!(!tracker.client().is_authenticated());
    }

    #[test]
    fn invalid_host_is_config_error() {
        let config = TrackerConfig {
            host: "bad host\n".into(),
            ..TrackerConfig::default()
        };
        assert!(matches!(Tracker::new(&config), Err(CoreError::Config { .. })));
    }
}
