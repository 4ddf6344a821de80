//! `tpwatch watch`: run the scanner until Ctrl-C.

use chrono::Local;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tpwatch_core::{DeviceScanner, DeviceSink, SeenDevice, Tracker, TrackerConfig};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

/// Prints one line per reported device.
struct ReportSink {
    format: OutputFormat,
    quiet: bool,
    reported: usize,
}

impl DeviceSink for ReportSink {
    fn see(&mut self, device: SeenDevice<'_>) {
        self.reported += 1;
        if self.quiet {
            return;
        }

        let line = match self.format {
            OutputFormat::Json => match serde_json::to_string(device.attributes) {
                Ok(json) => json,
                Err(e) => {
                    warn!(mac = %device.mac, error = %e, "failed to serialize device");
                    return;
                }
            },
            OutputFormat::Plain => format!("{}\t{}", device.dev_id, device.host_name),
            OutputFormat::Table => format!(
                "{}  {}  {:<24}  {:<8}{}",
                Local::now().format("%H:%M:%S"),
                device.mac,
                device.host_name,
                device.attributes.state.to_string(),
                if device.attributes.is_deprecate { "  (deprecated)" } else { "" },
            ),
        };
        output::print_output(&line, false);
    }
}

pub async fn handle(
    tracker: Tracker,
    config: &TrackerConfig,
    args: &WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let period = match args.interval {
        Some(secs) => tpwatch_config::positive_secs("interval", secs)?,
        None => config.scan_interval,
    };

    let sink = ReportSink {
        format: global.output,
        quiet: global.quiet,
        reported: 0,
    };
    let mut scanner = DeviceScanner::new(tracker, sink);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            on_signal.cancel();
        }
    });

    scanner.run(period, cancel).await;

    info!(
        reports = scanner.sink().reported,
        known = scanner.devices().len(),
        "watch finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use tpwatch_core::{ConnectionType, DeviceRecord, HostState, MacAddress, SOURCE_TYPE_ROUTER};

    use super::*;

    #[test]
    fn quiet_sink_still_counts_reports() {
        let record = DeviceRecord {
            mac: MacAddress::new("AA-BB-CC-DD-EE-FF"),
            hostname: "nas".into(),
            ip: None,
            connection_type: ConnectionType::Wired,
            state: HostState::Online,
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
        let mut sink = ReportSink {
            format: OutputFormat::Plain,
            quiet: true,
            reported: 0,
        };

        for _ in 0..2 {
            sink.see(SeenDevice {
                mac: &record.mac,
                dev_id: "AABBCCDDEEFF",
                host_name: &record.hostname,
                source_type: SOURCE_TYPE_ROUTER,
                attributes: &record,
            });
        }
        assert_eq!(sink.reported, 2);
    }
}
