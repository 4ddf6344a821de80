// Router transport
//
// Builds the reqwest::Client and issues the single JSON POST shape the
// router speaks. Every call is one attempt; failures are logged here and
// returned to the caller, which decides whether to drop the session.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HOST, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;

/// A decoded top-level JSON object from the router.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("tpwatch/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// JSON-over-HTTP transport bound to a single router host.
#[derive(Debug, Clone)]
pub struct RouterTransport {
    http: reqwest::Client,
    host: String,
}

impl RouterTransport {
    /// Create a transport for `host` (e.g. `192.168.1.1` or `192.168.1.1:8080`).
    pub fn new(host: impl Into<String>, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_client(config.build_client()?, host))
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            http,
            host: host.into(),
        }
    }

    /// The router host this transport talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// POST `body` as JSON and decode the reply as a JSON object.
    ///
    /// `Host` and `Content-Type: application/json` are always sent;
    /// entries in `extra_headers` are overlaid and win on conflict.
    pub async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
        extra_headers: HeaderMap,
    ) -> Result<JsonObject, Error> {
        let display_url = redact_url(&url);
        debug!("POST {}", display_url);

        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(&self.host)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        let resp = match self.http.post(url).headers(headers).json(body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(url = %display_url, error = %e, "request failed");
                return Err(Error::Transport(e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body = truncate(&body).to_owned();
            error!(url = %display_url, %status, body = %body, "request rejected");
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await.map_err(|e| {
            error!(url = %display_url, error = %e, "failed to read response body");
            Error::Transport(e)
        })?;

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => {
                error!(url = %display_url, "response is not a JSON object");
                Err(Error::Deserialization {
                    message: format!("expected JSON object, got {}", json_kind(&other)),
                    body: text,
                })
            }
            Err(e) => {
                error!(url = %display_url, error = %e, "response is not valid JSON");
                Err(Error::Deserialization {
                    message: format!("{e} (body preview: {:?})", truncate(&text)),
                    body: text,
                })
            }
        }
    }
}

/// Strip the session token out of a URL before it reaches a log line.
pub fn redact_url(url: &Url) -> String {
    let Some(segments) = url.path_segments() else {
        return url.to_string();
    };
    if !segments.clone().any(|s| s.starts_with("stok=")) {
        return url.to_string();
    }
    let path: Vec<&str> = segments
        .map(|s| if s.starts_with("stok=") { "stok=REDACTED" } else { s })
        .collect();
    let mut redacted = url.clone();
    redacted.set_path(&path.join("/"));
    redacted.to_string()
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn redacts_session_token_in_path() {
        let url = Url::parse("http://192.168.1.1/stok=abc123/ds").unwrap();
        assert_eq!(redact_url(&url), "http://192.168.1.1/stok=REDACTED/ds");
        assert!(!redact_url(&url).contains("abc123"));
    }

    #[test]
    fn leaves_login_url_alone() {
        let url = Url::parse("http://192.168.1.1/").unwrap();
        assert_eq!(redact_url(&url), "http://192.168.1.1/");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate(&long).chars().count(), 200);
        assert_eq!(truncate("short"), "short");
    }
}
