//! The body posted to the Hubot incoming-webhook endpoint.

use serde::{Deserialize, Serialize};

/// A rendered notification addressed to a chat room.
///
/// Field order matters for the wire format: `message` first, then `room`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HubotPayload {
    /// The human-readable notification text.
    pub message: String,
    /// The room (channel) the bot should post to. Opaque to this crate.
    pub room: String,
}

impl HubotPayload {
    /// Creates a payload for `room`.
    pub fn new(message: impl Into<String>, room: impl Into<String>) -> Self {
        Self { message: message.into(), room: room.into() }
    }
}
