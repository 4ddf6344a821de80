// Live host table
//
// `{"method":"get","host_management":{"table":"host_info"}}` against the
// data endpoint. One record per connected (or recently seen) device.

use serde_json::json;
use tracing::{debug, warn};

use crate::client::RouterClient;
use crate::error::Error;
use crate::models::{HostTableResponse, RawHostInfo};

impl RouterClient {
    /// Fetch the live host table, logging in first if no session is held.
    ///
    /// Any failure after the session is established clears the token, so
    /// the next call starts with a fresh login instead of replaying a
    /// stale `stok`.
    pub async fn host_table(&mut self) -> Result<Vec<RawHostInfo>, Error> {
        self.require_session().await?;
        debug!("loading host table");

        let body = json!({
            "method": "get",
            "host_management": { "table": "host_info" },
        });

        match self.data_post(&body).await.and_then(HostTableResponse::decode) {
            Ok(rows) => {
                debug!(count = rows.len(), "host table loaded");
                Ok(rows)
            }
            Err(e) => {
                warn!(error = %e, "host table fetch failed");
                self.invalidate_session();
                Err(e)
            }
        }
    }
}
