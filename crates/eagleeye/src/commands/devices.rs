//! Device command handlers.

use secrecy::SecretString;
use tabled::Tabled;

use eagleeye_core::format::format_timestamp_opt;
use eagleeye_core::{
    ActiveState, Command as CoreCommand, CommandOutcome, Device, FilterSpec, Fleet, FleetSummary,
    ListView, MacAddress,
};

use crate::cli::{DeviceListArgs, DevicesArgs, DevicesCommand, GlobalOpts, OutputFormat, StateFilter};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Version")]
    version: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.device_id.map_or_else(String::new, |id| id.to_string()),
            ssid: d.ssid.clone().unwrap_or_else(|| "N/A".into()),
            mac: d
                .mac
                .as_ref()
                .map_or_else(|| "N/A".into(), MacAddress::to_string),
            ip: d.ip.map_or_else(|| "N/A".into(), |ip| ip.to_string()),
            state: d.state.to_string(),
            version: d.code_version.clone().unwrap_or_else(|| "N/A".into()),
        }
    }
}

#[derive(Tabled)]
struct ProvisionedRow {
    #[tabled(rename = "S.NO")]
    serial: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Created At")]
    created_at: String,
    #[tabled(rename = "Updated At")]
    updated_at: String,
}

// ── Detail rendering ────────────────────────────────────────────────

fn device_id_text(d: &Device) -> String {
    d.device_id.map_or_else(String::new, |id| id.to_string())
}

#[allow(clippy::too_many_lines)]
fn detail(d: &Device) -> String {
    let mut lines = vec![
        format!(
            "ID:          {}",
            d.device_id.map_or_else(|| "N/A".into(), |v| v.to_string())
        ),
        format!("Name:        {}", d.name.as_deref().unwrap_or("N/A")),
        format!("SSID:        {}", d.ssid.as_deref().unwrap_or("N/A")),
        format!(
            "MAC:         {}",
            d.mac
                .as_ref()
                .map_or_else(|| "N/A".into(), MacAddress::to_string)
        ),
        format!(
            "IP:          {}",
            d.ip.map_or_else(|| "N/A".into(), |ip| ip.to_string())
        ),
        format!("State:       {}", d.state),
        format!("Online:      {}", if d.online { "yes" } else { "no" }),
        format!("Version:     {}", d.code_version.as_deref().unwrap_or("N/A")),
        format!("Boot Time:   {}", format_timestamp_opt(d.boot_time)),
        format!("Sync Time:   {}", format_timestamp_opt(d.sync_time)),
    ];

    if let Some(ref appliance) = d.appliance_state {
        lines.push(format!("Appliance:   {appliance}"));
    }
    if let Some(powersave) = d.powersave {
        lines.push(format!(
            "Powersave:   {}",
            if powersave { "on" } else { "off" }
        ));
    }
    if let Some(millis) = d.millis {
        lines.push(format!("Millis:      {millis}"));
    }
    if let Some(signal) = d.signal_strength_dbm {
        lines.push(format!("Signal:      {signal} dBm"));
    }
    if let Some(code) = d.boot_status_code {
        lines.push(format!("Boot Status: {code}"));
    }
    if let Some(publish) = d.message_publish_status {
        lines.push(format!(
            "Publishing:  {}",
            if publish { "yes" } else { "no" }
        ));
    }
    if let Some(nvs) = d.latest_nvs() {
        lines.push(format!(
            "NVS:         {} used / {} free / {} total",
            nvs.used, nvs.free, nvs.total
        ));
    }
    if let Some(spiffs) = d.latest_spiffs() {
        lines.push(format!(
            "SPIFFS:      {:.2} KB used / {:.2} KB total",
            to_kb(spiffs.used),
            to_kb(spiffs.total)
        ));
    }

    if !d.users.is_empty() {
        lines.push("Users:".into());
        for user in &d.users {
            lines.push(format!(
                "  {}  {}  {}  failures: {}",
                user.user_code.as_deref().unwrap_or("N/A"),
                user.name.as_deref().unwrap_or("N/A"),
                user.ip_address
                    .map_or_else(|| "N/A".into(), |ip| ip.to_string()),
                user.failure_count
            ));
        }
    }

    lines.join("\n")
}

#[allow(clippy::cast_precision_loss)]
fn to_kb(bytes: i64) -> f64 {
    bytes as f64 / 1024.0
}

fn telemetry_detail(d: &Device) -> String {
    let mut lines = Vec::new();

    lines.push("WiFi signal (dBm):".to_owned());
    if d.signal_history.is_empty() {
        lines.push("  no samples".into());
    }
    for sample in &d.signal_history {
        lines.push(format!(
            "  {}  {:.1}",
            format_timestamp_opt(sample.time),
            sample.strength_dbm
        ));
    }

    lines.push("NVS storage:".into());
    if d.nvs_history.is_empty() {
        lines.push("  no samples".into());
    }
    for sample in &d.nvs_history {
        lines.push(format!(
            "  {}  used {}  free {}  total {}",
            format_timestamp_opt(sample.time),
            sample.used,
            sample.free,
            sample.total
        ));
    }

    lines.push("SPIFFS storage:".into());
    if d.spiffs_history.is_empty() {
        lines.push("  no samples".into());
    }
    for sample in &d.spiffs_history {
        lines.push(format!(
            "  {}  used {:.2} KB  total {:.2} KB",
            format_timestamp_opt(sample.time),
            to_kb(sample.used),
            to_kb(sample.total)
        ));
    }

    lines.join("\n")
}

// ── List-view assembly ──────────────────────────────────────────────

fn state_of(filter: StateFilter) -> ActiveState {
    match filter {
        StateFilter::Active => ActiveState::Active,
        StateFilter::Inactive => ActiveState::Inactive,
        StateFilter::Waiting => ActiveState::Waiting,
    }
}

/// The summary-button state filter replaces the collection wholesale (it
/// is exact on the state, unlike the substring status predicate), so it
/// runs on the snapshot before the view sees it.
fn apply_state_filter(devices: Vec<Device>, state: Option<StateFilter>) -> Vec<Device> {
    match state {
        None => devices,
        Some(filter) => {
            let wanted = state_of(filter);
            devices.into_iter().filter(|d| d.state == wanted).collect()
        }
    }
}

fn build_view(args: &DeviceListArgs) -> ListView<Device> {
    let mut view = ListView::new(args.page.page_size);
    view.set_filter(FilterSpec::field_contains(
        args.field.clone(),
        args.filter.clone().unwrap_or_default(),
    ));
    if args.hide_filtered {
        view.toggle_hide_filtered();
    }
    view
}

fn render_view(view: &ListView<Device>, summary: FleetSummary, global: &GlobalOpts) -> String {
    let body = output::render_list(&global.output, view.visible(), |d| DeviceRow::from(d), device_id_text);

    if matches!(global.output, OutputFormat::Table) {
        format!(
            "Total: {}  Active: {}  Inactive: {}  Waiting: {}\n{}\nPage {} of {} ({} devices shown)",
            summary.total,
            summary.active,
            summary.inactive,
            summary.waiting,
            body,
            view.pager().current_page(),
            view.pager().total_pages(),
            view.display_len(),
        )
    } else {
        body
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(fleet: &Fleet, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => {
            let devices = fleet.devices().await?;
            let summary = FleetSummary::of(&devices);

            let mut view = build_view(&list);
            view.apply_snapshot(apply_state_filter(devices, list.state));
            view.go_to_page(list.page.page);

            output::print_output(&render_view(&view, summary, global), global.quiet);
            Ok(())
        }

        DevicesCommand::Watch(list) => {
            let session = fleet.poll_devices();
            let mut view = build_view(&list);
            let state = list.state;

            util::watch_loop(
                session,
                &mut view,
                global,
                move |records| apply_state_filter(records, state),
                |v| render_view(v, FleetSummary::of(v.records()), global),
            )
            .await
        }

        DevicesCommand::Get { device } => {
            let found = util::resolve_device(fleet, &device).await?;
            let out = output::render_single(&global.output, &found, detail, device_id_text);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Telemetry { device } => {
            let found = util::resolve_device(fleet, &device).await?;
            let out =
                output::render_single(&global.output, &found, telemetry_detail, device_id_text);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Provisioned(page_args) => {
            let page = fleet
                .provisioned(page_args.page, page_args.page_size)
                .await?;
            let offset = page.page_index * page.page_size;

            let out = if matches!(global.output, OutputFormat::Table) {
                let rows: Vec<ProvisionedRow> = page
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, d)| ProvisionedRow {
                        serial: (offset + 1 + i64::try_from(i).unwrap_or(0)).to_string(),
                        id: d.dev_id.to_string(),
                        mac: d
                            .mac
                            .as_ref()
                            .map_or_else(|| "N/A".into(), MacAddress::to_string),
                        created_at: format_timestamp_opt(d.created_at),
                        updated_at: format_timestamp_opt(d.updated_at),
                    })
                    .collect();
                format!(
                    "{}\nPage {} of {}",
                    output::render_table(&rows),
                    page.page_index + 1,
                    page.total_pages
                )
            } else {
                output::render_list(
                    &global.output,
                    &page.items,
                    |d| ProvisionedRow {
                        serial: String::new(),
                        id: d.dev_id.to_string(),
                        mac: String::new(),
                        created_at: String::new(),
                        updated_at: String::new(),
                    },
                    |d| d.dev_id.to_string(),
                )
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add {
            mac,
            ssid,
            password,
            mqtt_password,
        } => {
            let outcome = fleet
                .execute(CoreCommand::Provision {
                    mac: MacAddress::new(&mac),
                    ssid,
                    password: SecretString::from(password),
                    mqtt_password: SecretString::from(mqtt_password),
                })
                .await?;

            if let CommandOutcome::Provisioned {
                device,
                credentials,
            } = outcome
            {
                let text = [
                    format!("Device {} provisioned", device.dev_id),
                    format!(
                        "MAC:           {}",
                        device
                            .mac
                            .as_ref()
                            .map_or_else(|| "N/A".into(), MacAddress::to_string)
                    ),
                    format!(
                        "SSID:          {}",
                        credentials.ssid.as_deref().unwrap_or("N/A")
                    ),
                    format!(
                        "Password:      {}",
                        credentials.password.as_deref().unwrap_or("N/A")
                    ),
                    format!(
                        "MQTT password: {}",
                        credentials.mqtt_password.as_deref().unwrap_or("N/A")
                    ),
                ]
                .join("\n");
                output::print_output(&text, global.quiet);
            }
            Ok(())
        }

        DevicesCommand::Delete { dev_id } => {
            if !util::confirm(
                &format!("Delete device {dev_id}? This action cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            let outcome = fleet.execute(CoreCommand::Deprovision { dev_id }).await?;
            if let CommandOutcome::Ack { message } = outcome {
                if !global.quiet {
                    eprintln!(
                        "{}",
                        message.unwrap_or_else(|| "Device deleted successfully.".into())
                    );
                }
            }
            Ok(())
        }

        DevicesCommand::Ssid => {
            let suggestion = fleet.suggest_ssid().await?;
            output::print_output(
                suggestion.as_deref().unwrap_or("Unknown SSID"),
                global.quiet,
            );
            Ok(())
        }
    }
}
