//! CLI flag overrides on top of `tpwatch-config` profiles.
//!
//! Core never sees these types -- it receives a pre-built `TrackerConfig`.

use secrecy::SecretString;

use tpwatch_config::{Config, Profile};
use tpwatch_core::TrackerConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the `TrackerConfig` for the active profile with flag overrides.
///
/// With no matching profile, `--host` (or `TPWATCH_HOST`) alone is enough.
pub fn build_tracker_config(global: &GlobalOpts) -> Result<TrackerConfig, CliError> {
    let cfg = tpwatch_config::load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let base = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None => {
            if global.profile.is_some() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available_profiles(&cfg),
                });
            }
            let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
                path: tpwatch_config::config_path().display().to_string(),
            })?;
            Profile {
                host,
                username: "admin".into(),
                password: None,
                scan_interval: None,
                timeout: None,
            }
        }
    };

    let merged = apply_overrides(base, global);
    let mut tracker = tpwatch_config::profile_to_tracker_config(&merged, &profile_name, &cfg.defaults)?;

    // An explicit flag beats the env/keyring chain.
    if let Some(ref password) = global.password {
        tracker.password = SecretString::from(password.clone());
    }
    Ok(tracker)
}

/// Overlay the connection flags onto a profile.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        profile.username.clone_from(username);
    }
    if global.password.is_some() {
        profile.password.clone_from(&global.password);
    }
    if global.scan_interval.is_some() {
        profile.scan_interval = global.scan_interval;
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}
