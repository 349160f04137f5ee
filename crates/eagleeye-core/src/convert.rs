// ── API-to-domain type conversions ──
//
// Bridges raw `eagleeye_api` wire records into canonical
// `eagleeye_core::model` domain types. Each `From` impl normalizes field
// names, parses strings into strong types, and fills sensible defaults for
// missing optional data.

use std::net::IpAddr;

use chrono::{DateTime, Utc};

use eagleeye_api::types::{
    AlarmRecord, CustomerDeviceRecord, CustomerRecord, DeviceCredRecord, DeviceRecord,
    DeviceUserRecord, NvsSampleRecord, ProvisionedDeviceRecord, SignalSampleRecord,
    SpiffsSampleRecord,
};

use crate::format::parse_backend_timestamp;
use crate::model::{
    ActiveState, Alarm, Customer, CustomerDevice, Device, DeviceCredentials, DeviceUser,
    MacAddress, NvsSample, ProvisionedDevice, Severity, SignalSample, SpiffsSample,
};

// ── Helpers ──────────────────────────────────────────────────────────

/// Parse an optional string to an `IpAddr`, silently dropping unparseable
/// values.
fn parse_ip(raw: Option<&String>) -> Option<IpAddr> {
    raw.and_then(|s| s.parse().ok())
}

/// Parse an optional backend timestamp string (naive-means-UTC).
fn parse_ts(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| parse_backend_timestamp(s))
}

fn parse_mac(raw: Option<&String>) -> Option<MacAddress> {
    raw.as_ref()
        .filter(|s| !s.trim().is_empty())
        .map(MacAddress::new)
}

// ── Devices ──────────────────────────────────────────────────────────

impl From<SignalSampleRecord> for SignalSample {
    fn from(r: SignalSampleRecord) -> Self {
        Self {
            strength_dbm: r.strength.unwrap_or(0.0),
            time: parse_ts(r.time.as_ref()),
        }
    }
}

impl From<NvsSampleRecord> for NvsSample {
    fn from(r: NvsSampleRecord) -> Self {
        Self {
            used: r.nvs_used.unwrap_or(0),
            free: r.nvs_free.unwrap_or(0),
            total: r.nvs_total.unwrap_or(0),
            time: parse_ts(r.time.as_ref()),
        }
    }
}

impl From<SpiffsSampleRecord> for SpiffsSample {
    fn from(r: SpiffsSampleRecord) -> Self {
        Self {
            used: r.spiffs_used.unwrap_or(0),
            total: r.spiffs_total.unwrap_or(0),
            time: parse_ts(r.time.as_ref()),
        }
    }
}

impl From<DeviceUserRecord> for DeviceUser {
    fn from(r: DeviceUserRecord) -> Self {
        // The backend serializes the failure count as a string; "0" when
        // missing, matching the dashboard fallback.
        let failure_count = r
            .user_failure_count
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        Self {
            customer_id: r.customer_id,
            name: r.name,
            user_code: r.user_code,
            ip_address: parse_ip(r.user_ip_address.as_ref()),
            failure_count,
        }
    }
}

impl From<DeviceRecord> for Device {
    fn from(r: DeviceRecord) -> Self {
        Self {
            device_id: r.device_id,
            name: r.device_name,
            ssid: r.ssid,
            mac: parse_mac(r.mac_address.as_ref()),
            ip: parse_ip(r.ip_address.as_ref()),
            online: r.online.unwrap_or(false),
            state: ActiveState::from_code(r.active_state),
            code_version: r.code_version,
            appliance_state: r.appliance_state,
            powersave: r.powersave,
            username: r.username,
            created_at: parse_ts(r.created_at.as_ref()),
            updated_at: parse_ts(r.updated_at.as_ref()),
            boot_time: parse_ts(r.boot_time.as_ref()),
            sync_time: parse_ts(r.sync_time.as_ref()),
            millis: r.millis,
            signal_strength_dbm: r.signal_strength,
            boot_status_code: r.boot_status_code,
            message_publish_status: r.message_publish_status,
            signal_history: r
                .wifi_signal_strength
                .unwrap_or_default()
                .into_iter()
                .map(SignalSample::from)
                .collect(),
            nvs_history: r
                .nvs_storage
                .unwrap_or_default()
                .into_iter()
                .map(NvsSample::from)
                .collect(),
            spiffs_history: r
                .spiffs_storage
                .unwrap_or_default()
                .into_iter()
                .map(SpiffsSample::from)
                .collect(),
            users: r
                .device_users
                .unwrap_or_default()
                .into_iter()
                .map(DeviceUser::from)
                .collect(),
        }
    }
}

impl From<ProvisionedDeviceRecord> for ProvisionedDevice {
    fn from(r: ProvisionedDeviceRecord) -> Self {
        Self {
            dev_id: r.dev_id.unwrap_or(0),
            user_id: r.user_id,
            mac: parse_mac(r.mac_address.as_ref()),
            created_at: parse_ts(r.created_at.as_ref()),
            updated_at: parse_ts(r.updated_at.as_ref()),
            last_connection_at: parse_ts(r.last_connection_at.as_ref()),
        }
    }
}

impl From<DeviceCredRecord> for DeviceCredentials {
    fn from(r: DeviceCredRecord) -> Self {
        Self {
            cred_id: r.cred_id,
            ssid: r.def_dev_ssid,
            password: r.def_dev_password,
            mqtt_password: r.mqtt_password,
            sync_at: parse_ts(r.sync_at.as_ref()),
        }
    }
}

// ── Alarms ───────────────────────────────────────────────────────────

impl From<AlarmRecord> for Alarm {
    fn from(r: AlarmRecord) -> Self {
        Self {
            severity: r.severity.and_then(Severity::from_code),
            entity_type: r.entity_type,
            entity_id: r.entity_id,
            key: r.key,
            status: r.status,
            start_time: parse_ts(r.start_time.as_ref()),
            duration_secs: r.duration,
        }
    }
}

// ── Customers ────────────────────────────────────────────────────────

impl From<CustomerDeviceRecord> for CustomerDevice {
    fn from(r: CustomerDeviceRecord) -> Self {
        Self {
            dev_id: r.dev_id,
            mac: parse_mac(r.mac_address.as_ref()),
            version: r.version,
            connected: r.connected,
            demo: r.demo,
            last_connection_at: parse_ts(r.last_connection_at.as_ref()),
        }
    }
}

impl From<CustomerRecord> for Customer {
    fn from(r: CustomerRecord) -> Self {
        Self {
            id: r.id,
            code: r.code,
            name: r.name,
            email: r.email,
            mobile: r.mobile,
            created_at: parse_ts(r.created_at.as_ref()),
            updated_at: parse_ts(r.updated_at.as_ref()),
            devices: r
                .devices
                .unwrap_or_default()
                .into_iter()
                .map(CustomerDevice::from)
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn device_conversion_normalizes_mac_and_state() {
        let record = DeviceRecord {
            device_id: Some(7),
            mac_address: Some("AA:BB:CC:DD:EE:FF".into()),
            ip_address: Some("10.0.0.7".into()),
            active_state: Some(1),
            boot_time: Some("2025-03-01 06:00:00".into()),
            ..DeviceRecord::default()
        };

        let device = Device::from(record);

        assert_eq!(device.mac.unwrap().as_str(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(device.state, ActiveState::Active);
        assert_eq!(device.ip.unwrap().to_string(), "10.0.0.7");
        assert_eq!(
            device.boot_time.unwrap().to_rfc3339(),
            "2025-03-01T06:00:00+00:00"
        );
    }

    #[test]
    fn device_conversion_tolerates_empty_record() {
        let device = Device::from(DeviceRecord::default());
        assert_eq!(device.device_id, None);
        assert_eq!(device.mac, None);
        assert!(!device.online);
        assert_eq!(device.state, ActiveState::Unknown);
        assert!(device.signal_history.is_empty());
    }

    #[test]
    fn alarm_conversion_maps_severity_codes() {
        let record = AlarmRecord {
            severity: Some(4),
            key: Some("OFFLINE".into()),
            start_time: Some("2025-03-01 09:30:00".into()),
            duration: Some(90_061),
            ..AlarmRecord::default()
        };

        let alarm = Alarm::from(record);
        assert_eq!(alarm.severity, Some(Severity::Error));
        assert!(alarm.start_time.is_some());

        let unknown = Alarm::from(AlarmRecord {
            severity: Some(9),
            ..AlarmRecord::default()
        });
        assert_eq!(unknown.severity, None);
    }

    #[test]
    fn device_user_failure_count_parses_string() {
        let user = DeviceUser::from(DeviceUserRecord {
            user_failure_count: Some("3".into()),
            ..DeviceUserRecord::default()
        });
        assert_eq!(user.failure_count, 3);

        let fallback = DeviceUser::from(DeviceUserRecord {
            user_failure_count: Some("n/a".into()),
            ..DeviceUserRecord::default()
        });
        assert_eq!(fallback.failure_count, 0);
    }
}
