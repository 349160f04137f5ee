//! Customer command handlers.

use tabled::Tabled;

use eagleeye_core::format::format_timestamp_opt;
use eagleeye_core::{Customer, FilterSpec, Fleet, ListView, MacAddress};

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Mobile")]
    mobile: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.map_or_else(String::new, |id| id.to_string()),
            name: c.name.clone().unwrap_or_else(|| "N/A".into()),
            email: c.email.clone().unwrap_or_else(|| "N/A".into()),
            mobile: c.mobile.clone().unwrap_or_else(|| "N/A".into()),
        }
    }
}

fn customer_id(c: &Customer) -> String {
    c.id.map_or_else(String::new, |id| id.to_string())
}

fn detail(c: &Customer, version: Option<&str>, connected: Option<bool>, demo: Option<bool>) -> String {
    let mut lines = vec![
        format!("ID:         {}", c.id.map_or_else(|| "NA".into(), |v| v.to_string())),
        format!("Code:       {}", c.code.as_deref().unwrap_or("NA")),
        format!("Name:       {}", c.name.as_deref().unwrap_or("NA")),
        format!("Email:      {}", c.email.as_deref().unwrap_or("NA")),
        format!("Mobile:     {}", c.mobile.as_deref().unwrap_or("NA")),
        format!("Created At: {}", format_timestamp_opt(c.created_at)),
        format!("Updated At: {}", format_timestamp_opt(c.updated_at)),
        format!("Devices:    {}", c.devices.len()),
        format!("Connected:  {}", c.connected_count()),
    ];

    let devices = c.filtered_devices(version, connected, demo);
    if !devices.is_empty() {
        lines.push("Attached devices:".into());
        for device in devices {
            lines.push(format!(
                "  {}  {}  version {}  connected: {}  demo: {}",
                device
                    .dev_id
                    .map_or_else(|| "N/A".into(), |id| id.to_string()),
                device
                    .mac
                    .as_ref()
                    .map_or_else(|| "N/A".into(), MacAddress::to_string),
                device.version.as_deref().unwrap_or("N/A"),
                device.connected.map_or("N/A", |c| if c { "yes" } else { "no" }),
                device.demo.map_or("N/A", |d| if d { "yes" } else { "no" }),
            ));
        }
    }

    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    fleet: &Fleet,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CustomersCommand::List {
            filter,
            field,
            page,
        } => {
            let customers = fleet.customers().await?;

            let mut view: ListView<Customer> = ListView::new(page.page_size);
            view.set_filter(FilterSpec::field_contains(
                field,
                filter.unwrap_or_default(),
            ));
            view.apply_snapshot(customers);
            view.go_to_page(page.page);

            let body = output::render_list(
                &global.output,
                view.visible(),
                |c| CustomerRow::from(c),
                customer_id,
            );
            let out = if matches!(global.output, OutputFormat::Table) {
                format!(
                    "{}\nPage {} of {} ({} customers shown)",
                    body,
                    view.pager().current_page(),
                    view.pager().total_pages(),
                    view.display_len(),
                )
            } else {
                body
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get {
            id,
            version,
            connected,
            demo,
        } => {
            let customer = fleet.customer(id).await?;
            let out = output::render_single(
                &global.output,
                &customer,
                |c| detail(c, version.as_deref(), connected, demo),
                customer_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
