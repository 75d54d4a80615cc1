//! Data models exchanged between the host and the notification pipeline.

pub mod event;
pub mod payload;

pub use event::{EventKind, EventValidationError, WikiEvent};
pub use payload::HubotPayload;
