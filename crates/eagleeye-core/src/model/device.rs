// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::mac::MacAddress;

/// Device activity state as reported by the monitoring backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[non_exhaustive]
pub enum ActiveState {
    Inactive,
    Active,
    Waiting,
    Unknown,
}

impl ActiveState {
    /// Map the backend's numeric code (0 inactive, 1 active, 2 waiting).
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Inactive,
            Some(1) => Self::Active,
            Some(2) => Self::Waiting,
            _ => Self::Unknown,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One WiFi signal-strength sample (dBm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    pub strength_dbm: f64,
    pub time: Option<DateTime<Utc>>,
}

/// One NVS storage sample (bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvsSample {
    pub used: i64,
    pub free: i64,
    pub total: i64,
    pub time: Option<DateTime<Utc>>,
}

/// One SPIFFS storage sample (bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiffsSample {
    pub used: i64,
    pub total: i64,
    pub time: Option<DateTime<Utc>>,
}

/// A user attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUser {
    pub customer_id: Option<i64>,
    pub name: Option<String>,
    pub user_code: Option<String>,
    pub ip_address: Option<IpAddr>,
    pub failure_count: u32,
}

/// The canonical device type for the monitoring views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub device_id: Option<i64>,
    pub name: Option<String>,
    pub ssid: Option<String>,
    pub mac: Option<MacAddress>,
    pub ip: Option<IpAddr>,
    pub online: bool,
    pub state: ActiveState,
    pub code_version: Option<String>,
    pub appliance_state: Option<String>,
    pub powersave: Option<bool>,
    pub username: Option<String>,

    // Lifecycle
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub boot_time: Option<DateTime<Utc>>,
    pub sync_time: Option<DateTime<Utc>>,

    // Health
    pub millis: Option<i64>,
    pub signal_strength_dbm: Option<f64>,
    pub boot_status_code: Option<i64>,
    pub message_publish_status: Option<bool>,

    // Telemetry series
    pub signal_history: Vec<SignalSample>,
    pub nvs_history: Vec<NvsSample>,
    pub spiffs_history: Vec<SpiffsSample>,

    pub users: Vec<DeviceUser>,
}

impl Device {
    /// Latest NVS sample, if any telemetry was reported.
    pub fn latest_nvs(&self) -> Option<&NvsSample> {
        self.nvs_history.last()
    }

    /// Latest SPIFFS sample, if any telemetry was reported.
    pub fn latest_spiffs(&self) -> Option<&SpiffsSample> {
        self.spiffs_history.last()
    }
}

/// Summary counts for the device list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub waiting: usize,
}

impl FleetSummary {
    pub fn of(devices: &[Device]) -> Self {
        let mut summary = Self {
            total: devices.len(),
            ..Self::default()
        };
        for device in devices {
            match device.state {
                ActiveState::Active => summary.active += 1,
                ActiveState::Inactive => summary.inactive += 1,
                ActiveState::Waiting => summary.waiting += 1,
                ActiveState::Unknown => {}
            }
        }
        summary
    }
}

/// A device row from the provisioning database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedDevice {
    pub dev_id: i64,
    pub user_id: Option<i64>,
    pub mac: Option<MacAddress>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_connection_at: Option<DateTime<Utc>>,
}

/// Credential pair minted when a device is provisioned. The SSID/password
/// pair is shown to the operator who flashes the device, so it stays plain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCredentials {
    pub cred_id: Option<i64>,
    pub ssid: Option<String>,
    pub password: Option<String>,
    pub mqtt_password: Option<String>,
    pub sync_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_state_codes() {
        assert_eq!(ActiveState::from_code(Some(0)), ActiveState::Inactive);
        assert_eq!(ActiveState::from_code(Some(1)), ActiveState::Active);
        assert_eq!(ActiveState::from_code(Some(2)), ActiveState::Waiting);
        assert_eq!(ActiveState::from_code(Some(7)), ActiveState::Unknown);
        assert_eq!(ActiveState::from_code(None), ActiveState::Unknown);
    }

    #[test]
    fn active_state_parses_case_insensitive() {
        assert_eq!("Active".parse::<ActiveState>().ok(), Some(ActiveState::Active));
        assert_eq!("WAITING".parse::<ActiveState>().ok(), Some(ActiveState::Waiting));
    }

    #[test]
    fn fleet_summary_counts_states() {
        let device = |state: ActiveState| Device {
            device_id: None,
            name: None,
            ssid: None,
            mac: None,
            ip: None,
            online: false,
            state,
            code_version: None,
            appliance_state: None,
            powersave: None,
            username: None,
            created_at: None,
            updated_at: None,
            boot_time: None,
            sync_time: None,
            millis: None,
            signal_strength_dbm: None,
            boot_status_code: None,
            message_publish_status: None,
            signal_history: Vec::new(),
            nvs_history: Vec::new(),
            spiffs_history: Vec::new(),
            users: Vec::new(),
        };

        let devices = vec![
            device(ActiveState::Active),
            device(ActiveState::Active),
            device(ActiveState::Inactive),
            device(ActiveState::Waiting),
            device(ActiveState::Unknown),
        ];

        let summary = FleetSummary::of(&devices);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.inactive, 1);
        assert_eq!(summary.waiting, 1);
    }
}
