//! Command line subcommands acting as a minimal host for the notification
//! pipeline.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{models::WikiEvent, notification::error::NotificationError};

pub mod render;
pub mod send;

pub use render::RenderArgs;
pub use send::SendArgs;

/// Errors surfaced by the command line subcommands.
#[derive(Error, Debug)]
pub enum CmdError {
    /// The event file could not be read.
    #[error("Failed to read event from {path}: {source}")]
    ReadEvent {
        /// The path that was read, `-` for standard input.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The event file does not contain a valid event.
    #[error("Failed to parse event: {0}")]
    ParseEvent(#[from] serde_json::Error),

    /// The notification pipeline failed.
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

/// Reads a JSON encoded event from `path`, or from standard input when the
/// path is `-`.
pub fn read_event(path: &Path) -> Result<WikiEvent, CmdError> {
    let read_error = |source| CmdError::ReadEvent { path: path.to_path_buf(), source };
    let raw = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).map_err(read_error)?;
        raw
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };
    Ok(serde_json::from_str(&raw)?)
}
