//! Shared configuration for the EagleEye CLI.
//!
//! TOML profiles with environment overrides, resolved into
//! `eagleeye_core::FleetConfig`. The backend carries no authentication, so
//! a profile is just endpoint URLs plus transport/polling tuning.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eagleeye_core::{FleetConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' in {path}")]
    UnknownProfile { profile: String, path: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named deployment profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Poll cadence for watch views, humantime format (e.g. "60s", "2m").
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> String {
    "60s".into()
}

/// A named deployment profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Service host carrying `/eagleeye/` and `/database/api/`
    /// (e.g., "https://service.homenetics.in").
    pub service: String,

    /// Monitor host carrying the SSID, binary-generator, and command
    /// endpoints (e.g., "https://monitor.homenetics.in:34000"). Defaults to
    /// the service host.
    pub monitor: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override poll cadence (humantime format).
    pub poll_interval: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("in", "homenetics", "eagleeye").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("eagleeye");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path + environment. Split out so
/// tests can point at a temp file.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EAGLEEYE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// Pick the active profile name: explicit request, else config default,
/// else "default".
pub fn active_profile_name(requested: Option<&str>, cfg: &Config) -> String {
    requested
        .map(ToOwned::to_owned)
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `FleetConfig` from a profile plus global defaults.
pub fn profile_to_fleet_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<FleetConfig, ConfigError> {
    let service_url: url::Url = profile
        .service
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "service".into(),
            reason: format!("invalid URL: {}", profile.service),
        })?;

    let monitor_url: url::Url = match profile.monitor {
        Some(ref raw) => raw.parse().map_err(|_| ConfigError::Validation {
            field: "monitor".into(),
            reason: format!("invalid URL: {raw}"),
        })?,
        None => service_url.clone(),
    };

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    let poll_raw = profile
        .poll_interval
        .as_deref()
        .unwrap_or(&defaults.poll_interval);
    let poll_interval = parse_poll_interval(poll_raw)?;

    Ok(FleetConfig {
        service_url,
        monitor_url,
        tls,
        timeout,
        poll_interval,
    })
}

/// Parse a humantime interval string ("60s", "2m 30s").
pub fn parse_poll_interval(raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::Validation {
        field: "poll_interval".into(),
        reason: format!("'{raw}': {e}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_profiles_from_toml() {
        let file = write_config(
            r#"
            default_profile = "prod"

            [profiles.prod]
            service = "https://service.homenetics.in"
            monitor = "https://monitor.homenetics.in:34000"

            [profiles.staging]
            service = "https://staging.homenetics.in"
            insecure = true
            poll_interval = "10s"
            "#,
        );

        let cfg = load_config_from(file.path()).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("prod"));
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(
            cfg.profiles["prod"].monitor.as_deref(),
            Some("https://monitor.homenetics.in:34000")
        );
    }

    #[test]
    fn profile_resolves_to_fleet_config() {
        let profile = Profile {
            service: "https://service.homenetics.in".into(),
            monitor: None,
            ca_cert: None,
            insecure: Some(true),
            timeout: Some(5),
            poll_interval: Some("2m".into()),
        };

        let fleet = profile_to_fleet_config(&profile, &Defaults::default()).unwrap();

        // Monitor host falls back to the service host.
        assert_eq!(fleet.monitor_url, fleet.service_url);
        assert_eq!(fleet.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(fleet.timeout, Duration::from_secs(5));
        assert_eq!(fleet.poll_interval, Duration::from_secs(120));
    }

    #[test]
    fn invalid_service_url_is_rejected() {
        let profile = Profile {
            service: "not a url".into(),
            monitor: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            poll_interval: None,
        };

        let err = profile_to_fleet_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn active_profile_falls_back_to_default() {
        let cfg = Config::default();
        assert_eq!(active_profile_name(None, &cfg), "default");
        assert_eq!(active_profile_name(Some("staging"), &cfg), "staging");
    }

    #[test]
    fn poll_interval_parses_humantime() {
        assert_eq!(parse_poll_interval("60s").unwrap(), Duration::from_secs(60));
        assert_eq!(
            parse_poll_interval("1m 30s").unwrap(),
            Duration::from_secs(90)
        );
        assert!(parse_poll_interval("sixty").is_err());
    }
}
