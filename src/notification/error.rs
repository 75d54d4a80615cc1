//! Error types for the notification pipeline.

use std::time::Duration;

use thiserror::Error;

use crate::{http_client::HttpClientError, models::EventValidationError};

/// Failures of a single delivery attempt.
///
/// Only transport-level problems end up here. An endpoint answering with a
/// non-2xx status still counts as a completed delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// An error from the underlying `reqwest` client (DNS, connect, TLS, ...).
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A socket-level error of the buffered-stream transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The attempt did not finish within the configured deadline.
    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint URL cannot be used to open a connection.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The transport does not speak the endpoint's URL scheme.
    #[error("Unsupported URL scheme '{0}' for this transport")]
    UnsupportedScheme(String),

    /// The endpoint did not answer with a recognizable HTTP response.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Defines the possible errors that can occur while processing an event.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No webhook URL is configured, so there is nowhere to deliver to.
    #[error("Webhook URL is not configured")]
    ConfigurationMissing,

    /// The host handed over an event that violates the event contract.
    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] EventValidationError),

    /// The payload could not be serialized.
    #[error("Failed to encode payload: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The delivery attempt failed.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// An error originating from building the HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] HttpClientError),
}
