//! Output formatting: table, JSON, plain.
//!
//! Table uses `tabled`, JSON serializes the original records via serde,
//! plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use tpwatch_core::{DeviceRecord, HostState};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Device rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DeviceRow {
    #[tabled(rename = "MAC")]
    pub mac: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "IP")]
    pub ip: String,
    #[tabled(rename = "Type")]
    pub connection_type: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "Deprecated")]
    pub deprecated: String,
}

impl DeviceRow {
    pub fn from_record(record: &DeviceRecord, color: bool) -> Self {
        let state = record.state.to_string();
        let state = match (color, record.state) {
            (false, _) => state,
            (true, HostState::Online) => state.green().to_string(),
            (true, HostState::Offline) => state.dimmed().to_string(),
        };
        let deprecated = if record.is_deprecate {
            if color { "yes".yellow().to_string() } else { "yes".into() }
        } else {
            String::new()
        };

        Self {
            mac: record.mac.to_string(),
            name: record.hostname.clone(),
            ip: record.ip.map(|ip| ip.to_string()).unwrap_or_default(),
            connection_type: record.connection_type.to_string(),
            state,
            deprecated,
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tpwatch_core::{ConnectionType, MacAddress};

    use super::*;

    fn record(hostname: &str, deprecated: bool) -> DeviceRecord {
        DeviceRecord {
            mac: MacAddress::new("AA-BB-CC-DD-EE-FF"),
            hostname: hostname.into(),
            ip: "192.168.1.20".parse().ok(),
            connection_type: ConnectionType::Wired,
            state: HostState::Offline,
            is_deprecate: deprecated,
            up_limit: 0,
            down_limit: 0,
            interface: "br-lan".into(),
            is_cur_host: false,
            connect_date: String::new(),
            connect_time: String::new(),
            ssid: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn table_contains_device_columns() {
        let data = vec![record("printer", true)];
        let out = render_list(
            OutputFormat::Table,
            &data,
            |r| DeviceRow::from_record(r, false),
            |r| r.mac.to_string(),
        )
        .unwrap();
        assert!(out.contains("MAC"));
        assert!(out.contains("printer"));
        assert!(out.contains("192.168.1.20"));
        assert!(out.contains("yes"));
    }

    #[test]
    fn plain_lists_identifiers() {
        let data = vec![record("a", false), record("b", false)];
        let out = render_list(
            OutputFormat::Plain,
            &data,
            |r| DeviceRow::from_record(r, false),
            |r| r.hostname.clone(),
        )
        .unwrap();
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn json_uses_router_field_names() {
        let data = vec![record("printer", false)];
        let out = render_list(
            OutputFormat::Json,
            &data,
            |r| DeviceRow::from_record(r, false),
            |r| r.mac.to_string(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "wired");
        assert_eq!(value[0]["is_deprecate"], false);
    }
}
