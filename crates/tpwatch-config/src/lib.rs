//! Configuration for tpwatch.
//!
//! TOML profiles, password resolution (env + keyring + plaintext), and
//! translation to `tpwatch_core::TrackerConfig`. The CLI layers its own
//! flag overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tpwatch_core::TrackerConfig;

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "tpwatch";

/// Environment variable checked first for the router password.
pub const PASSWORD_ENV: &str = "TPWATCH_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The profile to use: an explicit name, else `default_profile`, else `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(String::from)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds between poll cycles.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            scan_interval: default_scan_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_scan_interval() -> u64 {
    tpwatch_core::DEFAULT_SCAN_INTERVAL.as_secs()
}

/// A named router profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router address, `192.168.1.1` or `192.168.1.1:8080`.
    pub host: String,

    #[serde(default = "default_username")]
    pub username: String,

    /// Password (plaintext -- prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Override scan interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_interval: Option<u64>,

    /// Override timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

fn default_username() -> String {
    "admin".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tpwatch", "tpwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tpwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TPWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the router password: env var, then keyring, then plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    let from_env = std::env::var(PASSWORD_ENV).ok();
    let from_keyring = || {
        keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
            .and_then(|entry| entry.get_password())
            .ok()
    };
    pick_password(from_env, from_keyring, profile, profile_name)
}

fn pick_password(
    from_env: Option<String>,
    from_keyring: impl FnOnce() -> Option<String>,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    from_env
        .filter(|pw| !pw.is_empty())
        .or_else(from_keyring)
        .or_else(|| profile.password.clone())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── Validation ──────────────────────────────────────────────────────

/// Check that `host` forms a usable `http://<host>` base URL.
pub fn validate_host(host: &str) -> Result<url::Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        field: "host".into(),
        reason,
    };

    let host = host.trim();
    if host.is_empty() {
        return Err(invalid("must not be empty".into()));
    }
    if host.contains("://") || host.contains('/') {
        return Err(invalid(format!(
            "expected an address like 192.168.1.1 or 192.168.1.1:8080, got '{host}'"
        )));
    }

    let url = url::Url::parse(&format!("http://{host}"))
        .map_err(|e| invalid(format!("'{host}': {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("'{host}' has no host part")));
    }
    Ok(url)
}

/// Convert a number of seconds to a positive `Duration`.
pub fn positive_secs(field: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be a positive number of seconds".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Build a `TrackerConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_tracker_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<TrackerConfig, ConfigError> {
    validate_host(&profile.host)?;

    if profile.username.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "username".into(),
            reason: "must not be empty".into(),
        });
    }

    let scan_interval = positive_secs(
        "scan_interval",
        profile.scan_interval.unwrap_or(defaults.scan_interval),
    )?;
    let timeout = positive_secs("timeout", profile.timeout.unwrap_or(defaults.timeout))?;
    let password = resolve_password(profile, profile_name)?;

    Ok(TrackerConfig {
        host: profile.host.trim().to_owned(),
        username: profile.username.clone(),
        password,
        timeout,
        scan_interval,
    })
}
