// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The fleet
// facade routes each variant to the appropriate backend endpoint.

use secrecy::SecretString;

use crate::model::{DeviceCredentials, MacAddress, ProvisionedDevice};

/// All possible write operations against the EagleEye backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Remote device commands ───────────────────────────────────────
    /// Restart the device firmware.
    Restart { mac: MacAddress },

    /// Toggle one of the device's relays (1-8).
    SetRelay {
        mac: MacAddress,
        relay_no: u8,
        on: bool,
    },

    // ── Provisioning ─────────────────────────────────────────────────
    /// Register a new device. When `ssid` is `None`, the fleet asks the
    /// monitor service for a suggestion first, as the add-device form does.
    Provision {
        mac: MacAddress,
        ssid: Option<String>,
        password: SecretString,
        mqtt_password: SecretString,
    },

    /// Delete a provisioned device by its database id.
    Deprovision { dev_id: i64 },

    // ── Firmware ─────────────────────────────────────────────────────
    /// Request a firmware binary for a device.
    GenerateBinary { version: String, device_id: i64 },
}

/// What a successfully executed command produced.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// Plain acknowledgment, with the backend's message if it sent one.
    Ack { message: Option<String> },

    /// A newly provisioned device and its credential pair.
    Provisioned {
        device: ProvisionedDevice,
        credentials: DeviceCredentials,
    },

    /// Generated binary payload (text).
    Binary { payload: String },
}
