use thiserror::Error;

/// Top-level error type for the `tpwatch-api` crate.
///
/// Covers every failure mode of the router API: transport, HTTP status,
/// authentication, and response decoding. `tpwatch-core` maps these into
/// cycle-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected or the response carried no `stok`.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated endpoint was called without a session token.
    #[error("No session token -- login required")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The router answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (host, referer) could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The HTTP client could not be built.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Well-formed HTTP success, but the expected table envelope is absent.
    #[error("Empty response: no `{table}` table in router reply")]
    EmptyResponse { table: &'static str },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
