//! # Payload Builder
//!
//! Serializes a rendered message and the configured room into the JSON body
//! expected by the Hubot incoming-webhook plugin.
//!
//! ## Core Components
//!
//! - **`PayloadBuilder` Trait**: A common interface for both wire formats.
//! - **`LegacyPayloadBuilder`**: Reproduces the historical body byte for byte,
//!   see [`encode`].
//! - **`JsonPayloadBuilder`**: Proper JSON via `serde_json`.

use crate::{config::PayloadEncoding, models::HubotPayload};

/// A trait for turning a message and room into the posted body.
pub trait PayloadBuilder: Send + Sync {
    /// Builds the request body.
    ///
    /// # Arguments
    ///
    /// * `message` - The rendered notification text.
    /// * `room` - The room identifier, passed through untouched.
    fn build_payload(&self, message: &str, room: &str) -> Result<String, serde_json::Error>;
}

/// Builds bodies in the historical hand-formatted layout.
pub struct LegacyPayloadBuilder;

impl PayloadBuilder for LegacyPayloadBuilder {
    fn build_payload(&self, message: &str, room: &str) -> Result<String, serde_json::Error> {
        Ok(encode(message, room))
    }
}

/// Builds compact, fully escaped JSON bodies.
pub struct JsonPayloadBuilder;

impl PayloadBuilder for JsonPayloadBuilder {
    fn build_payload(&self, message: &str, room: &str) -> Result<String, serde_json::Error> {
        serde_json::to_string(&HubotPayload::new(message, room))
    }
}

/// Returns the builder for the configured encoding.
pub fn payload_builder(encoding: PayloadEncoding) -> Box<dyn PayloadBuilder> {
    match encoding {
        PayloadEncoding::Legacy => Box::new(LegacyPayloadBuilder),
        PayloadEncoding::Json => Box::new(JsonPayloadBuilder),
    }
}

/// Encodes the legacy body `{"message": "<message>", "room": "<room>"}`.
///
/// The only escaping performed is replacing every `"` in `message` with `'`.
/// Backslashes and control characters pass through unchanged, so a message
/// containing them yields invalid JSON. `room` is embedded verbatim.
pub fn encode(message: &str, room: &str) -> String {
    let message = message.replace('"', "'");
    format!(r#"{{"message": "{message}", "room": "{room}"}}"#)
}
