use std::path::PathBuf;

use clap::Parser;

use super::{CmdError, read_event};
use crate::{
    config::AppConfig,
    notification::{DispatchOutcome, NotificationService},
};

/// Arguments of the `send` subcommand.
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Path to a JSON encoded event, or `-` to read it from standard input.
    #[arg(short, long)]
    event: PathBuf,
}

/// Runs the full pipeline for one event and waits for the delivery.
///
/// Unlike hook dispatch, failures are returned so the exit code reflects
/// them.
pub async fn execute(config: AppConfig, args: SendArgs) -> Result<(), CmdError> {
    let event = read_event(&args.event)?;
    let service = NotificationService::from_config(&config)?;

    match service.process(&event).await? {
        DispatchOutcome::Delivered => println!("Delivered {} notification.", event.kind()),
        DispatchOutcome::Skipped(reason) => {
            println!("Skipped {} notification: {:?}", event.kind(), reason)
        }
    }

    Ok(())
}
