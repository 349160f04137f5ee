//! Profile/flag resolution into a `FleetConfig`.
//!
//! Precedence: CLI flags > environment > profile > built-in defaults.

use eagleeye_config::{Config, Profile};
use eagleeye_core::{FleetConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `FleetConfig` from the config file, active profile, and CLI
/// overrides.
pub fn build_fleet_config(global: &GlobalOpts) -> Result<FleetConfig, CliError> {
    let cfg = eagleeye_config::load_config_or_default();
    let profile_name = eagleeye_config::active_profile_name(global.profile.as_deref(), &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut fleet = eagleeye_config::profile_to_fleet_config(profile, &cfg.defaults)?;
        apply_overrides(&mut fleet, global)?;
        return Ok(fleet);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(CliError::UnknownProfile {
            profile: profile_name,
        });
    }

    // No profile — build from flags / env vars alone.
    let Some(ref service) = global.service else {
        return Err(CliError::NoConfig {
            path: eagleeye_config::config_path().display().to_string(),
        });
    };

    let synthetic = Profile {
        service: service.clone(),
        monitor: global.monitor.clone(),
        ca_cert: None,
        insecure: Some(global.insecure),
        timeout: Some(global.timeout),
        poll_interval: global.poll_interval.clone(),
    };
    Ok(eagleeye_config::profile_to_fleet_config(
        &synthetic,
        &cfg.defaults,
    )?)
}

fn apply_overrides(fleet: &mut FleetConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref service) = global.service {
        let parsed: url::Url = service.parse().map_err(|_| CliError::Validation {
            field: "service".into(),
            reason: format!("invalid URL: {service}"),
        })?;
        fleet.service_url = parsed;
    }
    if let Some(ref monitor) = global.monitor {
        let parsed: url::Url = monitor.parse().map_err(|_| CliError::Validation {
            field: "monitor".into(),
            reason: format!("invalid URL: {monitor}"),
        })?;
        fleet.monitor_url = parsed;
    }
    if global.insecure {
        fleet.tls = TlsVerification::DangerAcceptInvalid;
    }
    fleet.timeout = std::time::Duration::from_secs(global.timeout);
    if let Some(ref raw) = global.poll_interval {
        fleet.poll_interval = eagleeye_config::parse_poll_interval(raw)?;
    }
    Ok(())
}

/// Load config and return it with the active profile name (for `config
/// show`).
pub fn load_with_active(global: &GlobalOpts) -> (Config, String) {
    let cfg = eagleeye_config::load_config_or_default();
    let name = eagleeye_config::active_profile_name(global.profile.as_deref(), &cfg);
    (cfg, name)
}
