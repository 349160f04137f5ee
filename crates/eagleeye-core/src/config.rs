// ── Runtime connection configuration ──
//
// These types describe *how* to reach the EagleEye services. The CLI
// constructs a `FleetConfig` and hands it in — core never reads config
// files.

use std::time::Duration;

use url::Url;

use eagleeye_api::transport::{TlsMode, TransportConfig};

use crate::poll::DEFAULT_POLL_INTERVAL;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging hosts).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for talking to one EagleEye deployment.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Service host carrying `/eagleeye/` and `/database/api/`.
    pub service_url: Url,
    /// Monitor host carrying the SSID, binary-generator, and command
    /// endpoints.
    pub monitor_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Refresh cadence for polling views.
    pub poll_interval: Duration,
}

impl FleetConfig {
    pub fn new(service_url: Url, monitor_url: Url) -> Self {
        Self {
            service_url,
            monitor_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}
