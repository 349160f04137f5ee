//! Wire types for the EagleEye backend.
//!
//! All types match the JSON bodies served under `/eagleeye/` and
//! `/database/api/`. Field names use camelCase via
//! `#[serde(rename_all = "camelCase")]` unless the backend emits snake_case
//! for a specific field. Every field the backend is known to omit is an
//! `Option`.

use serde::{Deserialize, Serialize};

// ── Pagination ───────────────────────────────────────────────────────

/// Page envelope returned by list endpoints that paginate server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub total_pages: i64,
}

/// Shape returned by unpaginated list endpoints — either a bare array or,
/// on newer backend revisions, a page envelope. Decoding branches on shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CollectionPayload<T> {
    Paged(PagedResponse<T>),
    Flat(Vec<T>),
}

impl<T> CollectionPayload<T> {
    /// Flatten to the record list, discarding page metadata if present.
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.content,
            Self::Flat(records) => records,
        }
    }
}

/// Shape returned by the customers endpoint — an array on most revisions,
/// a single bare object on one. Always normalized to a vector by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(x) => vec![x],
        }
    }
}

// ── Devices (monitoring) ─────────────────────────────────────────────

/// One WiFi signal-strength sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSampleRecord {
    pub strength: Option<f64>,
    pub time: Option<String>,
}

/// One NVS storage sample. The backend emits these keys in snake_case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvsSampleRecord {
    pub nvs_used: Option<i64>,
    pub nvs_free: Option<i64>,
    pub nvs_total: Option<i64>,
    pub time: Option<String>,
}

/// One SPIFFS storage sample. Snake_case on the wire, like NVS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpiffsSampleRecord {
    pub spiffs_used: Option<i64>,
    pub spiffs_total: Option<i64>,
    pub time: Option<String>,
}

/// A user attached to a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceUserRecord {
    pub customer_id: Option<i64>,
    pub name: Option<String>,
    pub user_code: Option<String>,
    pub user_ip_address: Option<String>,
    /// The backend serializes this count as a string.
    pub user_failure_count: Option<String>,
}

/// Device record — from `GET /eagleeye/devices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRecord {
    pub device_id: Option<i64>,
    pub device_name: Option<String>,
    pub ssid: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub online: Option<bool>,
    pub code_version: Option<String>,
    /// Naive timestamps (no UTC designator) — interpreted as UTC downstream.
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub boot_time: Option<String>,
    pub sync_time: Option<String>,
    /// 0 inactive, 1 active, 2 waiting.
    pub active_state: Option<i64>,
    pub appliance_state: Option<String>,
    pub powersave: Option<bool>,
    pub username: Option<String>,
    pub millis: Option<i64>,
    pub signal_strength: Option<f64>,
    pub boot_status_code: Option<i64>,
    pub message_publish_status: Option<bool>,
    pub download_mqtt_url_response_code: Option<i64>,
    pub wifi_signal_strength: Option<Vec<SignalSampleRecord>>,
    pub nvs_storage: Option<Vec<NvsSampleRecord>>,
    pub spiffs_storage: Option<Vec<SpiffsSampleRecord>>,
    pub device_users: Option<Vec<DeviceUserRecord>>,
}

// ── Alarms ───────────────────────────────────────────────────────────

/// Alarm record — from `GET /eagleeye/alarms`. Alarms carry no backend id;
/// they are identified by the `(entityId, key, startTime)` tuple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlarmRecord {
    /// 1 info, 2 ok, 3 warn, 4 error.
    pub severity: Option<i64>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub key: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    /// Seconds.
    pub duration: Option<i64>,
}

// ── Customers ────────────────────────────────────────────────────────

/// Device summary attached to a customer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDeviceRecord {
    pub dev_id: Option<i64>,
    pub mac_address: Option<String>,
    pub version: Option<String>,
    pub connected: Option<bool>,
    pub demo: Option<bool>,
    pub last_connection_at: Option<String>,
}

/// Customer record — from `GET /eagleeye/customers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerRecord {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub devices: Option<Vec<CustomerDeviceRecord>>,
}

// ── Provisioning (`/database/api/`) ──────────────────────────────────

/// Provisioned device row from the database service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionedDeviceRecord {
    pub dev_id: Option<i64>,
    pub user_id: Option<i64>,
    pub mac_address: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_connection_at: Option<String>,
}

/// Page of provisioned devices — from
/// `GET /database/api/devices?page=&pageSize=`. 1-based page index on this
/// endpoint, unlike the monitoring endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedPage {
    pub devices: Vec<ProvisionedDeviceRecord>,
    pub total_pages: i64,
}

/// Credential pair minted alongside a newly provisioned device. The backend
/// mixes camelCase and snake_case here; renames pin the snake_case fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceCredRecord {
    pub cred_id: Option<i64>,
    pub dev_id: Option<i64>,
    #[serde(rename = "def_dev_ssid")]
    pub def_dev_ssid: Option<String>,
    #[serde(rename = "def_dev_password")]
    pub def_dev_password: Option<String>,
    #[serde(rename = "mqtt_password")]
    pub mqtt_password: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub sync_at: Option<String>,
}

/// Response to device creation: the device plus its credential pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreated {
    pub device: ProvisionedDeviceRecord,
    pub device_cred: DeviceCredRecord,
}

/// Body for `POST /database/api/devices`. The mqtt password key is all
/// lowercase on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceRequest {
    pub mac_address: String,
    pub ssid: String,
    pub password: String,
    #[serde(rename = "mqttpassword")]
    pub mqtt_password: String,
}

// ── Monitor service (SSID, binary generator, commands) ───────────────

/// Suggested SSID for the add-device form — from `GET /get_new_device_ssid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsidSuggestion {
    pub ssid: Option<String>,
}

/// Available firmware versions for the binary generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirmwareVersions {
    pub versions: Vec<String>,
}

/// Body for the binary-generator endpoint. Snake_case on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct BinaryRequest {
    pub version: String,
    pub device_id: String,
}

/// Body for the remote-command endpoint. Snake_case on the wire. For plain
/// restarts `relay_no` and `state` are sent empty, matching the form.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub mac_address: String,
    pub command: String,
    pub relay_no: String,
    pub state: String,
}

/// Acknowledgment envelope `{message}` shared by command and delete
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub message: Option<String>,
}
