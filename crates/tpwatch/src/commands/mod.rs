//! Command dispatch: bridges CLI args -> tracker -> output formatting.

pub mod config_cmd;
pub mod name;
pub mod scan;
pub mod watch;

use tpwatch_core::{Tracker, TrackerConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: &TrackerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let tracker = Tracker::new(config)?;
    match cmd {
        Command::Scan(args) => scan::handle(tracker, &args, global).await,
        Command::Watch(args) => watch::handle(tracker, config, &args, global).await,
        Command::Name(args) => name::handle(tracker, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
