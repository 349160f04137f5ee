// Hand-crafted async HTTP client for the EagleEye backend.
//
// Two base URLs: the service host carries `/eagleeye/` (monitoring reads)
// and `/database/api/` (provisioning), the monitor host carries the SSID
// suggestion, binary generator, and remote command endpoints.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the EagleEye REST API.
///
/// Plain JSON over HTTPS; the backend carries no authentication. The
/// client performs no retries — a failed fetch surfaces as an [`Error`]
/// and the next poll tick retries incidentally.
pub struct EagleEyeClient {
    http: reqwest::Client,
    service_base: Url,
    monitor_base: Url,
}

impl EagleEyeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the two base URLs and a transport config.
    pub fn new(
        service_url: &str,
        monitor_url: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            service_base: normalize_base_url(service_url)?,
            monitor_base: normalize_base_url(monitor_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn from_reqwest(
        service_url: &str,
        monitor_url: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            service_base: normalize_base_url(service_url)?,
            monitor_base: normalize_base_url(monitor_url)?,
        })
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn service_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.service_base.join(path)?)
    }

    fn monitor_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.monitor_base.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");
        let resp = self.http.get(url).query(params).send().await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    /// POST where the response body is plain text, not JSON.
    async fn post_text<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<String, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp.text().await?)
        } else {
            Err(parse_error(status, resp).await)
        }
    }

    async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        handle_response(resp).await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Devices (monitoring) ─────────────────────────────────────────

    /// Fetch the device collection. The endpoint answers with either a
    /// bare array or a page envelope depending on backend revision.
    pub async fn list_devices(
        &self,
    ) -> Result<types::CollectionPayload<types::DeviceRecord>, Error> {
        self.get(self.service_url("eagleeye/devices")?).await
    }

    /// Fetch one server-side page of devices. Page index is 0-based on the
    /// wire.
    pub async fn list_devices_paged(
        &self,
        page: i64,
        size: i64,
        sort_fields: &[&str],
        sort_orders: &[&str],
    ) -> Result<types::PagedResponse<types::DeviceRecord>, Error> {
        self.get_with_params(
            self.service_url("eagleeye/devices")?,
            &paged_params(page, size, sort_fields, sort_orders),
        )
        .await
    }

    // ── Alarms ───────────────────────────────────────────────────────

    pub async fn list_alarms(&self) -> Result<types::CollectionPayload<types::AlarmRecord>, Error> {
        self.get(self.service_url("eagleeye/alarms")?).await
    }

    pub async fn list_alarms_paged(
        &self,
        page: i64,
        size: i64,
        sort_fields: &[&str],
        sort_orders: &[&str],
    ) -> Result<types::PagedResponse<types::AlarmRecord>, Error> {
        self.get_with_params(
            self.service_url("eagleeye/alarms")?,
            &paged_params(page, size, sort_fields, sort_orders),
        )
        .await
    }

    /// Alarms scoped to one entity — from `GET /eagleeye/alarms/{entityId}`.
    pub async fn alarms_for_entity(
        &self,
        entity_id: i64,
    ) -> Result<Vec<types::AlarmRecord>, Error> {
        let payload: types::CollectionPayload<types::AlarmRecord> = self
            .get(self.service_url(&format!("eagleeye/alarms/{entity_id}"))?)
            .await?;
        Ok(payload.into_records())
    }

    // ── Customers ────────────────────────────────────────────────────

    /// Fetch customers. One backend revision answers with a single bare
    /// object instead of an array; both shapes normalize to a vector here.
    pub async fn list_customers(&self) -> Result<Vec<types::CustomerRecord>, Error> {
        let payload: types::OneOrMany<types::CustomerRecord> =
            self.get(self.service_url("eagleeye/customers")?).await?;
        Ok(payload.into_vec())
    }

    // ── Provisioning ─────────────────────────────────────────────────

    /// One page of provisioned devices. Page index is 1-based on this
    /// endpoint.
    pub async fn list_provisioned(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<types::ProvisionedPage, Error> {
        self.get_with_params(
            self.service_url("database/api/devices")?,
            &[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    pub async fn create_device(
        &self,
        request: &types::NewDeviceRequest,
    ) -> Result<types::DeviceCreated, Error> {
        self.post(self.service_url("database/api/devices")?, request)
            .await
    }

    pub async fn delete_device(&self, dev_id: i64) -> Result<types::Ack, Error> {
        self.delete(self.service_url(&format!("database/api/devices/{dev_id}"))?)
            .await
    }

    // ── Monitor service ──────────────────────────────────────────────

    /// Suggested SSID for the add-device form.
    pub async fn suggest_ssid(&self) -> Result<types::SsidSuggestion, Error> {
        self.get(self.monitor_url("get_new_device_ssid")?).await
    }

    /// Firmware versions offered by the binary generator.
    pub async fn list_firmware_versions(&self) -> Result<types::FirmwareVersions, Error> {
        self.get(self.monitor_url("device_versions")?).await
    }

    /// Generate a firmware binary. The response body is text.
    pub async fn generate_binary(&self, request: &types::BinaryRequest) -> Result<String, Error> {
        self.post_text(self.monitor_url("generate_binary")?, request)
            .await
    }

    /// Send a remote command (restart or relay toggle) to a device.
    pub async fn send_command(&self, request: &types::CommandRequest) -> Result<types::Ack, Error> {
        self.post(self.monitor_url("restart_device")?, request)
            .await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Ensure a base URL ends with a single `/` so relative joins append.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

fn paged_params(
    page: i64,
    size: i64,
    sort_fields: &[&str],
    sort_orders: &[&str],
) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.to_string()),
        ("size", size.to_string()),
        ("sortFields", sort_fields.join(",")),
        ("sortOrders", sort_orders.join(",")),
    ]
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Decode {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    // Many endpoints wrap errors as `{message}`; fall back to the raw body.
    let message = serde_json::from_str::<types::Ack>(&raw)
        .ok()
        .and_then(|ack| ack.message)
        .unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw
            }
        });

    Error::Http {
        status: status.as_u16(),
        message,
    }
}
