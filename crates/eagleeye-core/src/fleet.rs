// ── Fleet facade ──
//
// The entry point for consumers: owns the API client, fetches and
// normalizes collections, executes commands, and vends poll sessions.
// Each view owns the sessions it creates — the facade holds no per-view
// state and no shared cache.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::debug;

use eagleeye_api::types::{
    BinaryRequest, CollectionPayload, CommandRequest, NewDeviceRequest,
};
use eagleeye_api::EagleEyeClient;

use crate::command::{Command, CommandOutcome};
use crate::config::FleetConfig;
use crate::error::CoreError;
use crate::model::{
    Alarm, Customer, Device, DeviceCredentials, MacAddress, ProvisionedDevice,
};
use crate::normalize::normalize;
use crate::poll::PollSession;
use crate::view::FetchedPage;

/// Page size used when draining a server-paginated device listing into one
/// in-memory set.
const DEVICE_PAGE_SIZE: i64 = 100;

/// Facade over the EagleEye backend.
///
/// Cheaply cloneable; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct Fleet {
    client: Arc<EagleEyeClient>,
    poll_interval: std::time::Duration,
}

impl Fleet {
    /// Build a fleet facade from connection configuration.
    pub fn new(config: &FleetConfig) -> Result<Self, CoreError> {
        let client = EagleEyeClient::new(
            config.service_url.as_str(),
            config.monitor_url.as_str(),
            &config.transport(),
        )?;
        Ok(Self {
            client: Arc::new(client),
            poll_interval: config.poll_interval,
        })
    }

    /// Wrap an existing client (used by tests).
    pub fn from_client(client: EagleEyeClient, poll_interval: std::time::Duration) -> Self {
        Self {
            client: Arc::new(client),
            poll_interval,
        }
    }

    // ── Collection fetches ───────────────────────────────────────────

    /// Fetch every device into one normalized in-memory set.
    ///
    /// A flat response is used as-is; a paged response is drained page by
    /// page before deduplication.
    pub async fn devices(&self) -> Result<Vec<Device>, CoreError> {
        fetch_devices(Arc::clone(&self.client)).await
    }

    /// Fetch one device by id. Absence from the fetched collection is a
    /// local `NotFound`, not a server 404.
    pub async fn device(&self, device_id: i64) -> Result<Device, CoreError> {
        self.devices()
            .await?
            .into_iter()
            .find(|d| d.device_id == Some(device_id))
            .ok_or(CoreError::NotFound {
                entity_type: "device",
                identifier: device_id.to_string(),
            })
    }

    /// Fetch one device by MAC address.
    pub async fn device_by_mac(&self, mac: &MacAddress) -> Result<Device, CoreError> {
        self.devices()
            .await?
            .into_iter()
            .find(|d| d.mac.as_ref() == Some(mac))
            .ok_or(CoreError::NotFound {
                entity_type: "device",
                identifier: mac.to_string(),
            })
    }

    pub async fn alarms(&self) -> Result<Vec<Alarm>, CoreError> {
        fetch_alarms(Arc::clone(&self.client)).await
    }

    pub async fn alarms_for_entity(&self, entity_id: i64) -> Result<Vec<Alarm>, CoreError> {
        fetch_alarms_for_entity(Arc::clone(&self.client), entity_id).await
    }

    pub async fn customers(&self) -> Result<Vec<Customer>, CoreError> {
        fetch_customers(Arc::clone(&self.client)).await
    }

    /// Fetch one customer by id (local lookup, like devices).
    pub async fn customer(&self, id: i64) -> Result<Customer, CoreError> {
        self.customers()
            .await?
            .into_iter()
            .find(|c| c.id == Some(id))
            .ok_or(CoreError::NotFound {
                entity_type: "customer",
                identifier: id.to_string(),
            })
    }

    /// One server-side page of provisioned devices (1-based wire index on
    /// this endpoint).
    pub async fn provisioned(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<FetchedPage<ProvisionedDevice>, CoreError> {
        let raw = self
            .client
            .list_provisioned(page, page_size)
            .await
            .map_err(|e| CoreError::fetch("devices", e))?;

        Ok(FetchedPage {
            items: raw
                .devices
                .into_iter()
                .map(ProvisionedDevice::from)
                .collect(),
            page_index: (page - 1).max(0),
            page_size,
            total_pages: raw.total_pages,
        })
    }

    /// SSID suggestion for the add-device flow.
    pub async fn suggest_ssid(&self) -> Result<Option<String>, CoreError> {
        let suggestion = self
            .client
            .suggest_ssid()
            .await
            .map_err(|e| CoreError::fetch("SSID suggestion", e))?;
        Ok(suggestion.ssid)
    }

    /// Firmware versions offered by the binary generator.
    pub async fn firmware_versions(&self) -> Result<Vec<String>, CoreError> {
        let versions = self
            .client
            .list_firmware_versions()
            .await
            .map_err(|e| CoreError::fetch("firmware versions", e))?;
        Ok(versions.versions)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Execute a write operation.
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome, CoreError> {
        match command {
            Command::Restart { mac } => {
                let ack = self
                    .client
                    .send_command(&CommandRequest {
                        mac_address: mac.to_string(),
                        command: "restart".into(),
                        relay_no: String::new(),
                        state: String::new(),
                    })
                    .await?;
                Ok(CommandOutcome::Ack {
                    message: ack.message,
                })
            }

            Command::SetRelay { mac, relay_no, on } => {
                if !(1..=8).contains(&relay_no) {
                    return Err(CoreError::ValidationFailed {
                        message: format!("relay number must be 1-8, got {relay_no}"),
                    });
                }
                let ack = self
                    .client
                    .send_command(&CommandRequest {
                        mac_address: mac.to_string(),
                        command: "change-relay".into(),
                        relay_no: relay_no.to_string(),
                        state: if on { "1" } else { "0" }.into(),
                    })
                    .await?;
                Ok(CommandOutcome::Ack {
                    message: ack.message,
                })
            }

            Command::Provision {
                mac,
                ssid,
                password,
                mqtt_password,
            } => {
                // The add-device form pre-fills the SSID from the monitor
                // service when the operator leaves it blank.
                let ssid = match ssid {
                    Some(s) => s,
                    None => self
                        .suggest_ssid()
                        .await?
                        .unwrap_or_else(|| "Unknown SSID".to_owned()),
                };
                debug!(mac = %mac, ssid = %ssid, "provisioning device");

                let created = self
                    .client
                    .create_device(&NewDeviceRequest {
                        mac_address: mac.to_string(),
                        ssid,
                        password: password.expose_secret().to_owned(),
                        mqtt_password: mqtt_password.expose_secret().to_owned(),
                    })
                    .await?;

                Ok(CommandOutcome::Provisioned {
                    device: ProvisionedDevice::from(created.device),
                    credentials: DeviceCredentials::from(created.device_cred),
                })
            }

            Command::Deprovision { dev_id } => {
                let ack = self.client.delete_device(dev_id).await?;
                Ok(CommandOutcome::Ack {
                    message: ack.message,
                })
            }

            Command::GenerateBinary { version, device_id } => {
                let payload = self
                    .client
                    .generate_binary(&BinaryRequest {
                        version,
                        device_id: device_id.to_string(),
                    })
                    .await?;
                Ok(CommandOutcome::Binary { payload })
            }
        }
    }

    // ── Poll sessions ────────────────────────────────────────────────

    /// Recurring device-collection fetch for a list view.
    pub fn poll_devices(&self) -> PollSession<Device> {
        let client = Arc::clone(&self.client);
        PollSession::spawn(self.poll_interval, move || {
            fetch_devices(Arc::clone(&client))
        })
    }

    /// Recurring single-device fetch for a detail view. Yields a vec of at
    /// most one element.
    pub fn poll_device(&self, device_id: i64) -> PollSession<Device> {
        let client = Arc::clone(&self.client);
        PollSession::spawn(self.poll_interval, move || {
            let client = Arc::clone(&client);
            async move {
                let devices = fetch_devices(client).await?;
                Ok(devices
                    .into_iter()
                    .filter(|d| d.device_id == Some(device_id))
                    .collect())
            }
        })
    }

    pub fn poll_alarms(&self) -> PollSession<Alarm> {
        let client = Arc::clone(&self.client);
        PollSession::spawn(self.poll_interval, move || {
            fetch_alarms(Arc::clone(&client))
        })
    }

    pub fn poll_alarms_for_entity(&self, entity_id: i64) -> PollSession<Alarm> {
        let client = Arc::clone(&self.client);
        PollSession::spawn(self.poll_interval, move || {
            fetch_alarms_for_entity(Arc::clone(&client), entity_id)
        })
    }

    pub fn poll_customers(&self) -> PollSession<Customer> {
        let client = Arc::clone(&self.client);
        PollSession::spawn(self.poll_interval, move || {
            fetch_customers(Arc::clone(&client))
        })
    }
}

// ── Fetch helpers (shared by direct calls and poll closures) ─────────

async fn fetch_devices(client: Arc<EagleEyeClient>) -> Result<Vec<Device>, CoreError> {
    let payload = client
        .list_devices()
        .await
        .map_err(|e| CoreError::fetch("devices", e))?;

    let records = match payload {
        CollectionPayload::Flat(records) => records,
        CollectionPayload::Paged(_) => {
            // Paginating backend: drain every page into one set before
            // deduplication.
            let mut all = Vec::new();
            let mut page = 0;
            loop {
                let next = client
                    .list_devices_paged(page, DEVICE_PAGE_SIZE, &["deviceId"], &["asc"])
                    .await
                    .map_err(|e| CoreError::fetch("devices", e))?;
                let received = next.content.len();
                all.extend(next.content);
                page += 1;
                if received == 0 || page >= next.total_pages {
                    break;
                }
            }
            all
        }
    };

    Ok(normalize(records.into_iter().map(Device::from)))
}

async fn fetch_alarms(client: Arc<EagleEyeClient>) -> Result<Vec<Alarm>, CoreError> {
    let payload = client
        .list_alarms()
        .await
        .map_err(|e| CoreError::fetch("alarms", e))?;
    Ok(normalize(
        payload.into_records().into_iter().map(Alarm::from),
    ))
}

async fn fetch_alarms_for_entity(
    client: Arc<EagleEyeClient>,
    entity_id: i64,
) -> Result<Vec<Alarm>, CoreError> {
    let records = client
        .alarms_for_entity(entity_id)
        .await
        .map_err(|e| CoreError::fetch("alarms", e))?;
    Ok(normalize(records.into_iter().map(Alarm::from)))
}

async fn fetch_customers(client: Arc<EagleEyeClient>) -> Result<Vec<Customer>, CoreError> {
    let records = client
        .list_customers()
        .await
        .map_err(|e| CoreError::fetch("customers", e))?;
    Ok(normalize(records.into_iter().map(Customer::from)))
}
