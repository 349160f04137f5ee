//! Command dispatch: bridges CLI args -> fleet operations -> output
//! formatting.

pub mod alarms;
pub mod binary;
pub mod config_cmd;
pub mod customers;
pub mod devices;
pub mod remote;
pub mod util;

use eagleeye_core::Fleet;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, fleet: &Fleet, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(fleet, args, global).await,
        Command::Customers(args) => customers::handle(fleet, args, global).await,
        Command::Alarms(args) => alarms::handle(fleet, args, global).await,
        Command::Command(args) => remote::handle(fleet, args, global).await,
        Command::Binary(args) => binary::handle(fleet, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
