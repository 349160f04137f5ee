//! Firmware binary-generator command handlers.

use eagleeye_core::{Command as CoreCommand, CommandOutcome, Fleet};

use crate::cli::{BinaryArgs, BinaryCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(fleet: &Fleet, args: BinaryArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BinaryCommand::Versions => {
            let versions = fleet.firmware_versions().await?;
            output::print_output(&versions.join("\n"), global.quiet);
            Ok(())
        }

        BinaryCommand::Generate { version, device_id } => {
            let outcome = fleet
                .execute(CoreCommand::GenerateBinary { version, device_id })
                .await?;
            if let CommandOutcome::Binary { payload } = outcome {
                output::print_output(&payload, global.quiet);
            }
            Ok(())
        }
    }
}
