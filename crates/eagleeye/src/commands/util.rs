//! Shared helpers for command handlers.

use eagleeye_core::view::list_view::ListView;
use eagleeye_core::{Device, FieldLookup, Fleet, MacAddress, PollSession};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve a device identifier (numeric id or MAC) against the fetched
/// collection.
pub async fn resolve_device(fleet: &Fleet, identifier: &str) -> Result<Device, CliError> {
    if let Ok(id) = identifier.parse::<i64>() {
        return Ok(fleet.device(id).await?);
    }
    Ok(fleet.device_by_mac(&MacAddress::new(identifier)).await?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Drive a watch view: apply each poll update to the view model and
/// re-render until Ctrl-C.
///
/// The session is owned here, so leaving the loop (or the process dying)
/// tears the poll timer down with it.
pub async fn watch_loop<T>(
    session: PollSession<T>,
    view: &mut ListView<T>,
    global: &GlobalOpts,
    transform: impl Fn(Vec<T>) -> Vec<T>,
    render: impl Fn(&ListView<T>) -> String,
) -> Result<(), CliError>
where
    T: FieldLookup + Clone + PartialEq + Send + Sync + 'static,
{
    let mut rx = session.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let update = rx.borrow_and_update().clone();
                let Some(update) = update else { continue };

                match update.result {
                    Ok(records) => view.apply_snapshot(transform(records)),
                    Err(message) => view.apply_error(message),
                }

                if !global.quiet {
                    // Redraw in place for an interactive terminal feel.
                    print!("\x1b[2J\x1b[H");
                    println!("{}", render(view));
                }
                if let eagleeye_core::LoadState::Failed { message } = view.state() {
                    eprintln!("{message} (showing stale data)");
                }
            }
        }
    }

    Ok(())
}
