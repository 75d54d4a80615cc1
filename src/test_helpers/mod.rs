//! A set of helpers for testing

mod config;
mod event;
mod observer;
mod transport;

pub use config::create_test_config;
pub use event::{
    page_created_event, page_deleted_event, page_edited_event, page_moved_event,
    supported_events, user_blocked_event, user_created_event,
};
pub use observer::RecordingObserver;
pub use transport::RecordingTransport;
