//! `tpwatch name <MAC>`: display name of a single device.

use tpwatch_core::{MacAddress, Tracker};

use crate::cli::{GlobalOpts, NameArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(mut tracker: Tracker, args: &NameArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mac = MacAddress::new(&args.mac);
    if mac.is_empty() {
        return Err(CliError::Validation {
            field: "mac".into(),
            reason: "hardware address must not be empty".into(),
        });
    }

    let devices = tracker.try_get_host_info().await?;
    let record = devices.get(&mac).ok_or_else(|| CliError::DeviceNotFound {
        mac: mac.to_string(),
    })?;

    let out = output::render_single(
        global.output,
        record,
        |r| r.hostname.clone(),
        |r| r.hostname.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
