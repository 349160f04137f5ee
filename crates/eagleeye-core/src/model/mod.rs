// ── Canonical domain model ──
//
// Option-heavy wire records from `eagleeye-api` convert into these types
// (see `convert.rs`). Views never touch wire types directly.

pub mod alarm;
pub mod customer;
pub mod device;
pub mod mac;

pub use alarm::{Alarm, Severity};
pub use customer::{Customer, CustomerDevice};
pub use device::{
    ActiveState, Device, DeviceCredentials, DeviceUser, FleetSummary, NvsSample,
    ProvisionedDevice, SignalSample, SpiffsSample,
};
pub use mac::MacAddress;
