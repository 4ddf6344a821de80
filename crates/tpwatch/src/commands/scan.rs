//! `tpwatch scan`: one poll cycle, printed.

use tpwatch_core::{DeviceRecord, Tracker};

use crate::cli::{GlobalOpts, ScanArgs};
use crate::error::CliError;
use crate::output::{self, DeviceRow};

pub async fn handle(mut tracker: Tracker, args: &ScanArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = tracker.try_get_host_info().await?;

    let records: Vec<DeviceRecord> = devices
        .into_values()
        .filter(|d| !args.online || d.is_online())
        .filter(|d| !(args.hide_deprecated && d.is_deprecate))
        .collect();

    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        &records,
        |r| DeviceRow::from_record(r, color),
        |r| r.mac.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
