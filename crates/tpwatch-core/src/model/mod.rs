// ── Domain model ──

pub mod device;
pub mod mac;

pub use device::{ConnectionType, DeviceMap, DeviceRecord, HostState};
pub use mac::MacAddress;
