// DHCP static reservations
//
// `{"method":"get","dhcpd":{"table":"dhcp_static","para":{..}}}` against
// the data endpoint. Results are cached on the client; the cache is
// replaced wholesale on every successful fetch.

use serde_json::json;
use tracing::{debug, error, warn};

use crate::client::RouterClient;
use crate::error::Error;
use crate::models::{STATIC_TABLE_END, STATIC_TABLE_START, StaticTableResponse};

impl RouterClient {
    /// Reload the static-reservation cache, returning the number of entries.
    ///
    /// Requires an existing session and never logs in by itself. Only the
    /// first 200 reservations are requested; the router pages the rest.
    /// A failure clears the session token.
    pub async fn refresh_reservations(&mut self) -> Result<usize, Error> {
        match self.load_reservations().await {
            Ok(count) => Ok(count),
            Err(e) => {
                self.invalidate_session();
                Err(e)
            }
        }
    }

    /// [`refresh_reservations`](Self::refresh_reservations) without touching
    /// the session token on failure.
    pub(crate) async fn load_reservations(&mut self) -> Result<usize, Error> {
        if !self.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        debug!("loading static reservations");

        let body = json!({
            "method": "get",
            "dhcpd": {
                "table": "dhcp_static",
                "para": { "start": STATIC_TABLE_START, "end": STATIC_TABLE_END },
            },
        });

        match self.data_post(&body).await.and_then(StaticTableResponse::decode) {
            Ok(entries) => {
                self.reservations = entries
                    .into_iter()
                    .filter(|entry| !entry.mac.is_empty())
                    .map(|entry| (entry.mac.clone(), entry))
                    .collect();
                debug!(count = self.reservations.len(), "static reservations cached");
                Ok(self.reservations.len())
            }
            Err(e) => {
                warn!(error = %e, "static reservation fetch failed");
                Err(e)
            }
        }
    }

    /// [`refresh_reservations`](Self::refresh_reservations), reporting only success or failure.
    pub async fn fetch_static_reservations(&mut self) -> bool {
        match self.refresh_reservations().await {
            Ok(_) => true,
            Err(e) => {
                error!(host = %self.host(), error = %e, "static reservations unavailable");
                false
            }
        }
    }
}
