//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use tpwatch_config::ConfigError;
use tpwatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to router at {host}")]
    #[diagnostic(
        code(tpwatch::connection_failed),
        help(
            "Check that the router is reachable and its web UI is enabled.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { host: String, reason: String },

    #[error("Router request timed out")]
    #[diagnostic(
        code(tpwatch::timeout),
        help("Increase the timeout with --timeout or check router responsiveness.")
    )]
    Timeout,

    #[error("Router returned no `{table}` data")]
    #[diagnostic(
        code(tpwatch::empty_response),
        help("The session may have expired mid-cycle; the next run logs in again.")
    )]
    EmptyResponse { table: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tpwatch::auth_failed),
        help(
            "Verify the router username and password.\n\
             Run: tpwatch config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(tpwatch::no_credentials),
        help(
            "Store one with: tpwatch config set-password\n\
             Or set the TPWATCH_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("Device '{mac}' not found")]
    #[diagnostic(
        code(tpwatch::not_found),
        help("Run: tpwatch scan to see known devices")
    )]
    DeviceNotFound { mac: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Router API error: {message}")]
    #[diagnostic(code(tpwatch::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tpwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tpwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tpwatch --host <HOST> config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No router configured")]
    #[diagnostic(
        code(tpwatch::no_config),
        help(
            "Pass --host (or set TPWATCH_HOST), or create a profile with:\n  \
             tpwatch --host <HOST> config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(tpwatch::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(tpwatch::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::EmptyResponse { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { host, reason } => {
                CliError::ConnectionFailed { host, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::EmptyResponse { table } => CliError::EmptyResponse { table },
            CoreError::Api { message, status: _ } => CliError::ApiError { message },
            CoreError::Config { message } => CliError::Validation {
                field: "host".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
