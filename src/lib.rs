#![warn(missing_docs)]
//! Relays wiki lifecycle events (edits, page creations, deletions, moves, new
//! accounts, blocks) to a Hubot incoming-webhook endpoint as chat messages.

pub mod cmd;
pub mod config;
pub mod http_client;
pub mod models;
pub mod notification;
pub mod test_helpers;
