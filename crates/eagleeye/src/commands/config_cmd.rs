//! Config command handlers. These never touch the network.

use eagleeye_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(
                &eagleeye_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let (cfg, active) = config::load_with_active(global);

            let mut lines = vec![format!("Active profile: {active}")];
            if cfg.profiles.is_empty() {
                lines.push("No profiles configured.".into());
            }
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort();
            for name in names {
                let profile = &cfg.profiles[name];
                lines.push(format!("[{name}]"));
                lines.push(format!("  service = {}", profile.service));
                if let Some(ref monitor) = profile.monitor {
                    lines.push(format!("  monitor = {monitor}"));
                }
                if let Some(insecure) = profile.insecure {
                    lines.push(format!("  insecure = {insecure}"));
                }
                if let Some(ref interval) = profile.poll_interval {
                    lines.push(format!("  poll_interval = {interval}"));
                }
            }
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        ConfigCommand::Init {
            name,
            service,
            monitor,
        } => {
            // Validate before writing anything.
            let profile = Profile {
                service,
                monitor,
                ca_cert: None,
                insecure: None,
                timeout: None,
                poll_interval: None,
            };
            let defaults = eagleeye_config::Defaults::default();
            eagleeye_config::profile_to_fleet_config(&profile, &defaults)?;

            let mut cfg = eagleeye_config::load_config_or_default();
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            cfg.profiles.insert(name.clone(), profile);
            eagleeye_config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!(
                    "Profile '{name}' written to {}",
                    eagleeye_config::config_path().display()
                );
            }
            Ok(())
        }
    }
}
