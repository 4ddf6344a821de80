// ── Device scanner ──
//
// Drives the tracker on a timer and reports every device it finds to a
// sink. Keeps the last non-empty device map so name lookups keep working
// across a failed cycle.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::model::{DeviceMap, DeviceRecord, MacAddress};
use crate::tracker::Tracker;

/// Source type reported for every device seen through the router.
pub const SOURCE_TYPE_ROUTER: &str = "router";

/// One device report handed to a [`DeviceSink`].
#[derive(Debug, Clone, Copy)]
pub struct SeenDevice<'a> {
    pub mac: &'a MacAddress,
    /// Separator-free hardware address.
    pub dev_id: &'a str,
    pub host_name: &'a str,
    pub source_type: &'static str,
    /// The full record, serializable as the attribute mapping.
    pub attributes: &'a DeviceRecord,
}

/// Receiver for device reports.
pub trait DeviceSink {
    fn see(&mut self, device: SeenDevice<'_>);
}

impl<F> DeviceSink for F
where
    F: FnMut(SeenDevice<'_>),
{
    fn see(&mut self, device: SeenDevice<'_>) {
        self(device);
    }
}

/// Periodic scanner over a single router.
pub struct DeviceScanner<S> {
    tracker: Tracker,
    sink: S,
    devices: DeviceMap,
}

impl<S: DeviceSink> DeviceScanner<S> {
    pub fn new(tracker: Tracker, sink: S) -> Self {
        Self {
            tracker,
            sink,
            devices: DeviceMap::new(),
        }
    }

    /// Run one cycle and report every device to the sink.
    ///
    /// An empty result keeps the previous map and reports nothing.
    /// Returns whether the map was replaced.
    pub async fn update(&mut self) -> bool {
        let devices = self.tracker.get_host_info().await;
        if devices.is_empty() {
            error!(
                host = %self.tracker.client().host(),
                kept = self.devices.len(),
                "no devices returned; keeping previous results"
            );
            return false;
        }

        self.devices = devices;
        for record in self.devices.values() {
            let dev_id = record.mac.compact();
            self.sink.see(SeenDevice {
                mac: &record.mac,
                dev_id: &dev_id,
                host_name: &record.hostname,
                source_type: SOURCE_TYPE_ROUTER,
                attributes: record,
            });
        }
        debug!(devices = self.devices.len(), "devices reported");
        true
    }

    /// Run one cycle and return the hardware addresses now known.
    pub async fn scan_devices(&mut self) -> Vec<MacAddress> {
        self.update().await;
        self.devices.keys().cloned().collect()
    }

    /// Display name from the last fetched map.
    pub fn device_name(&self, mac: &MacAddress) -> Option<&str> {
        self.devices.get(mac).map(|record| record.hostname.as_str())
    }

    /// Full record from the last fetched map.
    pub fn extra_attributes(&self, mac: &MacAddress) -> Option<&DeviceRecord> {
        self.devices.get(mac)
    }

    pub fn devices(&self) -> &DeviceMap {
        &self.devices
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Update immediately, then once per `period` until `cancel` fires.
    pub async fn run(&mut self, period: Duration, cancel: CancellationToken) {
        info!(
            host = %self.tracker.client().host(),
            interval_secs = period.as_secs(),
            "scanner started"
        );

        self.update().await;

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the update above covers it.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.update().await;
                }
            }
        }

        info!("scanner stopped");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::TrackerConfig;

    use super::*;

    fn offline_tracker() -> Tracker {
        let config = TrackerConfig {
            host: "127.0.0.1:1".into(),
            ..TrackerConfig::default()
        };
        Tracker::new(&config).unwrap()
    }

    #[tokio::test]
    async fn failed_cycle_reports_nothing() {
        let mut seen = Vec::new();
        let mut scanner = DeviceScanner::new(offline_tracker(), |d: SeenDevice<'_>| {
            seen.push(d.dev_id.to_owned());
        });

        assert!(!scanner.update().await);
        assert!(scanner.scan_devices().await.is_empty());
        assert!(scanner.device_name(&MacAddress::new("AA-BB-CC-DD-EE-FF")).is_none());
        drop(scanner);
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn run_stops_when_cancelled() {
        let mut scanner = DeviceScanner::new(offline_tracker(), |_: SeenDevice<'_>| {});
        let cancel = CancellationToken::new();
        cancel.cancel();
        scanner.run(Duration::from_secs(3600), cancel).await;
        assert!(scanner.devices().is_empty());
    }
}
