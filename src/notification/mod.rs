//! # Notification Service
//!
//! This module turns wiki lifecycle events into chat messages and posts them
//! to a Hubot incoming-webhook endpoint.
//!
//! ## Core Components
//!
//! - **`NotificationService`**: The dispatcher. Holds the immutable settings,
//!   the formatter, the payload builder and the transport.
//! - **`MessageFormatter`**: Renders an event with its fixed template, or
//!   explains why the event is skipped.
//! - **`PayloadBuilder`**: Serializes message and room into the request body.
//! - **`DeliveryTransport`**: Performs the POST, either through a `reqwest`
//!   client or over a buffered TCP stream.
//! - **`DeliveryObserver`**: Optional callback informed of every delivery.
//!
//! ## Workflow
//!
//! 1. The host hands an event to [`NotificationService::dispatch`], which
//!    spawns the pipeline on the runtime and returns immediately.
//! 2. The enablement toggle for its kind is looked up; disabled kinds stop
//!    here without side effects.
//! 3. The formatter renders the message, or skips the event.
//! 4. An event that produced a message is checked for contract violations.
//! 5. The message and configured room are encoded into the body.
//! 6. The transport posts the body to the configured webhook URL.
//! 7. The outcome is logged and reported to the observer. Nothing is ever
//!    propagated back to the host.

use std::sync::Arc;

use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use url::Url;

use crate::{
    config::AppConfig,
    models::{EventKind, WikiEvent},
};

pub mod error;
pub mod formatter;
pub mod observer;
pub mod payload_builder;
pub mod transport;

use error::NotificationError;
pub use formatter::{MessageFormatter, SkipReason};
pub use observer::DeliveryObserver;
use payload_builder::{PayloadBuilder, payload_builder};
pub use transport::{DeliveryTransport, build_transport};

/// The result of processing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The payload was posted and the endpoint answered.
    Delivered,
    /// The event was intentionally not reported.
    Skipped(SkipReason),
}

/// A service that formats events and delivers them to the webhook.
pub struct NotificationService {
    /// Target of every delivery, `None` while unconfigured.
    webhook_url: Option<Url>,
    /// Room passed through to the bot.
    room_name: String,
    formatter: MessageFormatter,
    payload_builder: Box<dyn PayloadBuilder>,
    transport: Arc<dyn DeliveryTransport>,
    observer: Option<Arc<dyn DeliveryObserver>>,
    /// Runtime that was current when the service was built.
    runtime: Option<Handle>,
}

impl NotificationService {
    /// Creates a new `NotificationService` delivering through `transport`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application configuration loaded at startup.
    /// * `transport` - The strategy performing the outbound POST.
    pub fn new(config: &AppConfig, transport: Arc<dyn DeliveryTransport>) -> Self {
        Self {
            webhook_url: config.webhook_url.clone(),
            room_name: config.room_name.clone(),
            formatter: MessageFormatter::new(config.wiki.clone(), config.notifications),
            payload_builder: payload_builder(config.payload_encoding),
            transport,
            observer: None,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Creates a new `NotificationService` with the transport selected in
    /// `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotificationError> {
        let transport = build_transport(config)?;
        Ok(Self::new(config, transport))
    }

    /// Registers an observer informed of every delivery attempt.
    pub fn with_observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the runtime used by [`dispatch`](Self::dispatch) when it is called
    /// from outside any Tokio runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// The formatter used by this service.
    pub fn formatter(&self) -> &MessageFormatter {
        &self.formatter
    }

    /// Encodes `message` for the configured room without sending it.
    pub fn encode(&self, message: &str) -> Result<String, NotificationError> {
        Ok(self.payload_builder.build_payload(message, &self.room_name)?)
    }

    /// Runs the whole pipeline for one event and waits for the delivery.
    ///
    /// # Returns
    ///
    /// * `Ok(DispatchOutcome::Delivered)` - The endpoint answered (any status).
    /// * `Ok(DispatchOutcome::Skipped(_))` - The event is not reported.
    /// * `Err(NotificationError)` - The event is malformed, no webhook URL is
    ///   configured, or the delivery failed.
    pub async fn process(&self, event: &WikiEvent) -> Result<DispatchOutcome, NotificationError> {
        let kind = event.kind();
        let message = match self.formatter.render(event) {
            Ok(message) => message,
            Err(reason) => return Ok(DispatchOutcome::Skipped(reason)),
        };
        event.validate()?;

        let Some(endpoint) = &self.webhook_url else {
            return Err(NotificationError::ConfigurationMissing);
        };

        let payload = self.encode(&message)?;
        tracing::debug!(event = %kind, endpoint = %endpoint, payload = %payload, "Delivering notification.");

        let result = self.transport.deliver(endpoint, &payload).await;
        if let Some(observer) = &self.observer {
            observer.on_delivery(kind, &result);
        }
        result?;

        Ok(DispatchOutcome::Delivered)
    }

    /// Hands an event over for delivery and returns without waiting.
    ///
    /// The pipeline runs on a spawned task; its outcome only shows up in the
    /// logs and the observer. The task goes to the caller's runtime, or to the
    /// one the service was built on. Without either the event is dropped with
    /// an error log and `None` is returned.
    pub fn dispatch(self: &Arc<Self>, event: WikiEvent) -> Option<JoinHandle<()>> {
        let Some(runtime) = Handle::try_current().ok().or_else(|| self.runtime.clone()) else {
            tracing::error!(event = %event.kind(), "No Tokio runtime available, dropping notification.");
            return None;
        };

        let service = Arc::clone(self);
        Some(runtime.spawn(async move {
            let kind = event.kind();
            let outcome = service.process(&event).await;
            log_outcome(kind, &outcome);
        }))
    }

    /// Runs the notification service, dispatching every event received on
    /// `events_rx` until the channel is closed.
    pub async fn run(self: Arc<Self>, mut events_rx: mpsc::Receiver<WikiEvent>) {
        let mut in_flight = Vec::new();
        while let Some(event) = events_rx.recv().await {
            in_flight.retain(|handle: &JoinHandle<()>| !handle.is_finished());
            in_flight.extend(self.dispatch(event));
        }
        for handle in in_flight {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Notification task panicked.");
            }
        }
    }
}

fn log_outcome(kind: EventKind, outcome: &Result<DispatchOutcome, NotificationError>) {
    match outcome {
        Ok(DispatchOutcome::Delivered) => {
            tracing::info!(event = %kind, "Notification delivered.");
        }
        Ok(DispatchOutcome::Skipped(reason)) => {
            tracing::debug!(event = %kind, reason = ?reason, "Notification skipped.");
        }
        Err(NotificationError::ConfigurationMissing) => {
            tracing::warn!(event = %kind, "No webhook URL configured, dropping notification.");
        }
        Err(e @ NotificationError::MalformedEvent(_)) => {
            tracing::error!(event = %kind, error = %e, "Host passed a malformed event.");
        }
        Err(e) => {
            tracing::warn!(event = %kind, error = %e, "Failed to deliver notification.");
        }
    }
}
