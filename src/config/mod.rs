//! Configuration module for the wiki-to-Hubot bridge.

mod app_config;
mod delivery;
mod helpers;
mod http_base;
mod notifications;
mod wiki;

pub use app_config::{AppConfig, ConfigValidationError};
pub use delivery::{PayloadEncoding, TransportKind};
pub use helpers::{deserialize_duration_from_seconds, deserialize_optional_url};
pub use http_base::BaseHttpClientConfig;
pub use notifications::NotificationToggles;
pub use wiki::WikiConfig;
