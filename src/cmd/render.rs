use std::path::PathBuf;

use clap::Parser;

use super::{CmdError, read_event};
use crate::{config::AppConfig, notification::NotificationService};

/// Arguments of the `render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to a JSON encoded event, or `-` to read it from standard input.
    #[arg(short, long)]
    event: PathBuf,
}

/// Prints the message and payload an event would produce, without sending
/// anything.
pub fn execute(config: AppConfig, args: RenderArgs) -> Result<(), CmdError> {
    let event = read_event(&args.event)?;
    let service = NotificationService::from_config(&config)?;

    match service.formatter().render(&event) {
        Ok(message) => {
            println!("message: {message}");
            println!("payload: {}", service.encode(&message)?);
        }
        Err(reason) => println!("skipped: {reason:?}"),
    }

    Ok(())
}
