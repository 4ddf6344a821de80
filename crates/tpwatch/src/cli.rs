//! Clap derive structures for the `tpwatch` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tpwatch -- device presence tracking for TP-Link routers
#[derive(Debug, Parser)]
#[command(
    name = "tpwatch",
    version,
    about = "Track devices connected to a TP-Link router",
    long_about = "Polls a TP-Link router's web API for connected clients, merges them with\n\
        the DHCP static-reservation table, and reports every known device.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Router profile to use
    #[arg(long, short = 'p', env = "TPWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Router address, e.g. 192.168.1.1 (overrides profile)
    #[arg(long, env = "TPWATCH_HOST", global = true)]
    pub host: Option<String>,

    /// Router admin username (overrides profile)
    #[arg(long, short = 'u', env = "TPWATCH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Router admin password
    #[arg(long, env = "TPWATCH_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Seconds between poll cycles (overrides profile)
    #[arg(long, env = "TPWATCH_SCAN_INTERVAL", global = true)]
    pub scan_interval: Option<u64>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TPWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TPWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one poll cycle and list every known device
    #[command(alias = "ls")]
    Scan(ScanArgs),

    /// Poll on a timer and report devices until interrupted
    Watch(WatchArgs),

    /// Print the display name of one device
    Name(NameArgs),

    /// Manage configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Device commands ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Only list devices the router reports online
    #[arg(long)]
    pub online: bool,

    /// Hide devices offline for longer than the grace window
    #[arg(long)]
    pub hide_deprecated: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between poll cycles (overrides --scan-interval)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Hardware address, e.g. AA-BB-CC-DD-EE-FF or aa:bb:cc:dd:ee:ff
    pub mac: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (passwords redacted)
    Show,

    /// Print the configuration file path
    Path,

    /// Write a profile from --host/--username into the config file
    Init {
        /// Replace an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Store the router password for the active profile in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
