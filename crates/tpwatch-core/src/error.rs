// ── Core error types ──
//
// Cycle-level errors. Consumers never see raw HTTP or JSON failures; the
// `From<tpwatch_api::Error>` impl folds them into the few kinds a poll
// cycle can fail with.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to router at {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Router request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Router returned no `{table}` data")]
    EmptyResponse { table: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tpwatch_api::Error> for CoreError {
    fn from(err: tpwatch_api::Error) -> Self {
        match err {
            tpwatch_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tpwatch_api::Error::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "no session token -- login required".into(),
            },
            tpwatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        host: e
                            .url()
                            .and_then(|u| u.host_str().map(String::from))
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            tpwatch_api::Error::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            tpwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid router address: {e}"),
            },
            tpwatch_api::Error::InvalidHeader(e) => CoreError::Config {
                message: format!("Invalid router address: {e}"),
            },
            tpwatch_api::Error::Tls(msg) => CoreError::Internal(msg),
            tpwatch_api::Error::EmptyResponse { table } => CoreError::EmptyResponse {
                table: table.into(),
            },
            tpwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
