//! Hook for watching delivery results without changing delivery behavior.

use super::error::DeliveryError;
use crate::models::EventKind;

/// Receives the outcome of every attempted delivery.
///
/// Called from the task that performed the delivery, so implementations must
/// be cheap and must not block.
pub trait DeliveryObserver: Send + Sync {
    /// Called once per delivery attempt.
    fn on_delivery(&self, kind: EventKind, result: &Result<(), DeliveryError>);
}

impl<F> DeliveryObserver for F
where
    F: Fn(EventKind, &Result<(), DeliveryError>) + Send + Sync,
{
    fn on_delivery(&self, kind: EventKind, result: &Result<(), DeliveryError>) {
        self(kind, result)
    }
}
