mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // `watch` is long-running; its cycle summaries are worth seeing by default
    let baseline = u8::from(matches!(cli.command, Command::Watch(_)));
    init_tracing(cli.global.verbose.saturating_add(baseline));

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a router connection
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "tpwatch", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the router
        cmd => {
            let tracker_config = config::build_tracker_config(&cli.global)?;
            tracing::debug!(command = ?cmd, host = %tracker_config.host, "dispatching command");
            commands::dispatch(cmd, &tracker_config, &cli.global).await
        }
    }
}
