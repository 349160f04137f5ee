//! Remote device command handlers (restart, relay toggle).

use eagleeye_core::{Command as CoreCommand, CommandOutcome, Fleet, MacAddress};

use crate::cli::{GlobalOpts, RelayState, RemoteArgs, RemoteCommand};
use crate::error::CliError;

fn print_ack(outcome: &CommandOutcome, fallback: &str, quiet: bool) {
    if quiet {
        return;
    }
    if let CommandOutcome::Ack { message } = outcome {
        eprintln!("{}", message.as_deref().unwrap_or(fallback));
    }
}

pub async fn handle(fleet: &Fleet, args: RemoteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RemoteCommand::Restart { mac } => {
            let outcome = fleet
                .execute(CoreCommand::Restart {
                    mac: MacAddress::new(&mac),
                })
                .await?;
            print_ack(&outcome, "Restart command sent", global.quiet);
            Ok(())
        }

        RemoteCommand::Relay { mac, relay, state } => {
            let outcome = fleet
                .execute(CoreCommand::SetRelay {
                    mac: MacAddress::new(&mac),
                    relay_no: relay,
                    on: matches!(state, RelayState::On),
                })
                .await?;
            print_ack(&outcome, "Relay command sent", global.quiet);
            Ok(())
        }
    }
}
