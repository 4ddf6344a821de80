// Router session client
//
// Owns the transport, the credentials, the session token (`stok`), and the
// static-reservation cache. Every stateful method takes `&mut self`: one
// poll cycle drives the client at a time, so no lock is needed. The data
// fetchers live in `hosts` and `dhcp` as inherent methods.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::{DhcpStaticEntry, LoginResponse};
use crate::transport::{JsonObject, RouterTransport, TransportConfig};

/// Client for a single router.
#[derive(Debug)]
pub struct RouterClient {
    transport: RouterTransport,
    credentials: Credentials,
    base_url: Url,
    stok: Option<SecretString>,
    pub(crate) reservations: HashMap<String, DhcpStaticEntry>,
}

impl RouterClient {
    /// Create a client for `host` (`192.168.1.1`, optionally with `:port`).
    pub fn new(
        host: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::with_transport(RouterTransport::new(host, transport)?, credentials)
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: RouterTransport, credentials: Credentials) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{}", transport.host()))?;
        Ok(Self {
            transport,
            credentials,
            base_url,
            stok: None,
            reservations: HashMap::new(),
        })
    }

    /// The router host.
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    /// The login endpoint, `http://<host>/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The current session token, if logged in.
    pub fn session_token(&self) -> Option<&str> {
        self.stok.as_ref().map(|s| s.expose_secret())
    }

    pub fn is_authenticated(&self) -> bool {
        self.stok.is_some()
    }

    /// Cached static reservations, keyed by hardware address as reported.
    pub fn reservations(&self) -> &HashMap<String, DhcpStaticEntry> {
        &self.reservations
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in and store the returned `stok`.
    ///
    /// A successful login immediately refreshes the static-reservation
    /// cache; a failed refresh is logged but does not fail the login.
    pub async fn login(&mut self) -> Result<(), Error> {
        self.stok = None;
        info!(host = %self.host(), "retrieving auth token");

        let body = json!({
            "method": "do",
            "login": {
                "username": self.credentials.username,
                "password": self.credentials.password.expose_secret(),
            },
        });

        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("http://{}/login.htm", self.host()))?,
        );

        let resp = self
            .transport
            .post(self.base_url.clone(), &body, headers)
            .await?;

        let login: LoginResponse =
            serde_json::from_value(Value::Object(resp)).map_err(|e| Error::Deserialization {
                message: format!("invalid login response: {e}"),
                body: String::new(),
            })?;

        if login.stok.is_empty() {
            let message = match login.error_code {
                Some(code) => format!("router returned no stok (error_code {code})"),
                None => "router returned no stok".into(),
            };
            return Err(Error::Authentication { message });
        }

        self.stok = Some(SecretString::from(login.stok));
        info!(host = %self.host(), "login successful");

        if let Err(e) = self.load_reservations().await {
            warn!(error = %e, "static reservation refresh after login failed");
        }
        Ok(())
    }

    /// Log in, reporting only success or failure.
    pub async fn authenticate(&mut self) -> bool {
        match self.login().await {
            Ok(()) => true,
            Err(e) => {
                error!(host = %self.host(), error = %e, "login failed");
                false
            }
        }
    }

    /// Make sure a session token is held, logging in if needed.
    pub async fn require_session(&mut self) -> Result<(), Error> {
        if self.stok.is_some() {
            return Ok(());
        }
        self.login().await
    }

    /// [`require_session`](Self::require_session), reporting only success or failure.
    pub async fn ensure_session(&mut self) -> bool {
        if self.stok.is_some() {
            return true;
        }
        self.authenticate().await
    }

    /// Forget the session token and cached reservations.
    ///
    /// The router exposes no logout call, so this is a local reset.
    pub fn logout(&mut self) {
        self.stok = None;
        self.reservations.clear();
        debug!("session reset");
    }

    /// Drop the session token so the next call logs in again.
    pub(crate) fn invalidate_session(&mut self) {
        if self.stok.take().is_some() {
            warn!(host = %self.host(), "session token invalidated; next request will re-authenticate");
        }
    }

    // ── Authenticated requests ───────────────────────────────────────

    /// `http://<host>/stok=<token>/ds`
    pub(crate) fn data_url(&self) -> Result<Url, Error> {
        let token = self.session_token().ok_or(Error::NotAuthenticated)?;
        Ok(self.base_url.join(&format!("stok={token}/ds"))?)
    }

    /// POST to the data endpoint with the current token.
    ///
    /// Does not touch the session on failure; callers decide once the
    /// reply has been decoded.
    pub(crate) async fn data_post(&self, body: &Value) -> Result<JsonObject, Error> {
        let url = self.data_url()?;
        self.transport.post(url, body, HeaderMap::new()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(host: &str) -> RouterClient {
        let transport = RouterTransport::with_client(reqwest::Client::new(), host);
        RouterClient::with_transport(transport, Credentials::new("admin", "hunter2")).unwrap()
    }

    #[test]
    fn new_client_is_unauthenticated() {
        let c = client("192.168.1.1");
        assert!(!c.is_authenticated());
        assert!(c.session_token().is_none());
        assert!(c.reservations().is_empty());
        assert_eq!(c.base_url().as_str(), "http://192.168.1.1/");
    }

    #[test]
    fn data_url_requires_token() {
        let c = client("192.168.1.1");
        assert!(matches!(c.data_url(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn data_url_embeds_token() {
        let mut c = client("192.168.1.1:8080");
        c.stok = Some(SecretString::from("abc123".to_owned()));
        assert_eq!(
            c.data_url().unwrap().as_str(),
            "http://192.168.1.1:8080/stok=abc123/ds"
        );
    }

    #[test]
    fn logout_clears_state() {
        let mut c = client("192.168.1.1");
        c.stok = Some(SecretString::from("abc123".to_owned()));
        c.reservations
            .insert("AA-BB-CC-DD-EE-FF".into(), DhcpStaticEntry::default());
        c.logout();
        assert!(!c.is_authenticated());
        assert!(c.reservations().is_empty());
    }

    #[test]
    fn debug_output_hides_password() {
        let c = client("192.168.1.1");
        assert!(!format!("{c:?}").contains("hunter2"));
    }
}
