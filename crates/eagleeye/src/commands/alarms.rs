//! Alarm command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use eagleeye_core::format::{format_duration, format_timestamp_opt};
use eagleeye_core::view::sort_alarms;
use eagleeye_core::{Alarm, FilterSpec, Fleet, ListView, Severity};

use crate::cli::{AlarmListArgs, AlarmsArgs, AlarmsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlarmRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Entity ID")]
    entity_id: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Start Time")]
    start_time: String,
    #[tabled(rename = "Duration")]
    duration: String,
}

fn severity_label(severity: Option<Severity>, color: bool) -> String {
    let Some(severity) = severity else {
        return "unknown".into();
    };
    if !color {
        return severity.to_string();
    }
    match severity {
        Severity::Error => severity.to_string().red().to_string(),
        Severity::Warn => severity.to_string().yellow().to_string(),
        Severity::Ok => severity.to_string().green().to_string(),
        Severity::Info => severity.to_string().blue().to_string(),
    }
}

fn row(a: &Alarm, color: bool) -> AlarmRow {
    AlarmRow {
        severity: severity_label(a.severity, color),
        entity: a.entity_type.clone().unwrap_or_else(|| "N/A".into()),
        entity_id: a
            .entity_id
            .map_or_else(|| "N/A".into(), |id| id.to_string()),
        key: a.key.clone().unwrap_or_else(|| "N/A".into()),
        status: a.status.clone().unwrap_or_else(|| "N/A".into()),
        start_time: format_timestamp_opt(a.start_time),
        duration: format_duration(a.duration_secs),
    }
}

fn alarm_id(a: &Alarm) -> String {
    format!(
        "{}:{}:{}",
        a.entity_id.map_or_else(String::new, |id| id.to_string()),
        a.key.as_deref().unwrap_or(""),
        a.start_time.map_or_else(String::new, |t| t.timestamp().to_string()),
    )
}

// ── List-view assembly ──────────────────────────────────────────────

fn build_view(args: &AlarmListArgs) -> ListView<Alarm> {
    let mut view = ListView::new(args.page.page_size).with_sort(sort_alarms);
    view.set_filter(
        FilterSpec::field_contains(args.field.clone(), args.filter.clone().unwrap_or_default())
            .with_status(args.status.clone().unwrap_or_default()),
    );
    if args.hide_filtered {
        view.toggle_hide_filtered();
    }
    view
}

fn render_view(view: &ListView<Alarm>, global: &GlobalOpts) -> String {
    let color = output::should_color(&global.color);
    let body = output::render_list(
        &global.output,
        view.visible(),
        |a| row(a, color),
        alarm_id,
    );

    if matches!(global.output, OutputFormat::Table) {
        format!(
            "{}\nPage {} of {} ({} alarms shown)",
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

pub async fn handle(fleet: &Fleet, args: AlarmsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AlarmsCommand::List(list) => {
            let alarms = match list.entity {
                Some(entity_id) => fleet.alarms_for_entity(entity_id).await?,
                None => fleet.alarms().await?,
            };

            let mut view = build_view(&list);
            view.apply_snapshot(alarms);
            view.go_to_page(list.page.page);

            output::print_output(&render_view(&view, global), global.quiet);
            Ok(())
        }

        AlarmsCommand::Watch(list) => {
            let session = match list.entity {
                Some(entity_id) => fleet.poll_alarms_for_entity(entity_id),
                None => fleet.poll_alarms(),
            };
            let mut view = build_view(&list);

            util::watch_loop(session, &mut view, global, |records| records, |v| {
                render_view(v, global)
            })
            .await
        }
    }
}
