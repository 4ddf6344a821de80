//! Device reconciliation between the router API and a tracking sink.
//!
//! - **[`Tracker`]**: runs one poll cycle. It ensures a session, fetches the live
//!   host table, tops up the static-reservation cache, and merges the two
//!   into a [`DeviceMap`] keyed by hardware address.
//!
//! - **[`normalize`]**: per-record cleanup of the live host table, covering
//!   percent-decoding, placeholder hostname substitution, and the 7-day
//!   offline grace window behind `is_deprecate`.
//!
//! - **[`reconcile`]**: the merge. Reservation notes override
//!   display names and reserved-but-absent devices are synthesized offline.
//!
//! - **[`DeviceScanner`]**: owns a `Tracker`, remembers the last good map,
//!   and reports every device to a [`DeviceSink`] once per cycle.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod scanner;
pub mod tracker;

pub use config::{DEFAULT_SCAN_INTERVAL, TrackerConfig};
pub use error::CoreError;
pub use model::{ConnectionType, DeviceMap, DeviceRecord, HostState, MacAddress};
pub use scanner::{DeviceScanner, DeviceSink, SOURCE_TYPE_ROUTER, SeenDevice};
pub use tracker::Tracker;
