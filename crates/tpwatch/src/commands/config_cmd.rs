//! Config subcommand handlers.

use tpwatch_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

/// Replace plaintext passwords before the config is printed.
fn redact(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redact(tpwatch_config::load_config()?);
            let out = output::render_single(
                global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# failed to render config: {e}")),
                |c| config::available_profiles(c).replace(", ", "\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&tpwatch_config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { force } => {
            let mut cfg = tpwatch_config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            if cfg.profiles.contains_key(&profile_name) && !force {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: format!("profile '{profile_name}' already exists; pass --force to replace it"),
                });
            }

            let host = global.host.clone().unwrap_or_else(|| "192.168.1.1".into());
            tpwatch_config::validate_host(&host)?;
            if let Some(secs) = global.scan_interval {
                tpwatch_config::positive_secs("scan_interval", secs)?;
            }
            if let Some(secs) = global.timeout {
                tpwatch_config::positive_secs("timeout", secs)?;
            }

            if let Some(ref password) = global.password {
                tpwatch_config::store_password(&profile_name, password)?;
                if !global.quiet {
                    eprintln!("✓ Password stored in system keyring");
                }
            }

            let profile = Profile {
                host,
                username: global.username.clone().unwrap_or_else(|| "admin".into()),
                password: None,
                scan_interval: global.scan_interval,
                timeout: global.timeout,
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = tpwatch_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Profile '{profile_name}' written to {}", path.display());
                if global.password.is_none() {
                    eprintln!("  Store the router password with: tpwatch config set-password");
                }
            }
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = tpwatch_config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }

            let password = match global.password {
                Some(ref password) => password.clone(),
                None => rpassword::prompt_password(format!("Router password for '{profile_name}': "))?,
            };
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            tpwatch_config::store_password(&profile_name, &password)?;
            if !global.quiet {
                eprintln!("✓ Password for '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}
