// tpwatch-api: Async client for the TP-Link R470GP router's JSON-RPC API

pub mod auth;
pub mod client;
pub mod dhcp;
pub mod error;
pub mod hosts;
pub mod models;
pub mod transport;

pub use auth::Credentials;
pub use client::RouterClient;
pub use error::Error;
pub use models::{DhcpStaticEntry, RawHostInfo, STATIC_TABLE_END, STATIC_TABLE_START};
pub use transport::{JsonObject, RouterTransport, TransportConfig};
