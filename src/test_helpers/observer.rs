use std::sync::Mutex;

use crate::{
    models::EventKind,
    notification::{DeliveryObserver, error::DeliveryError},
};

/// An observer that remembers which deliveries succeeded.
#[derive(Default)]
pub struct RecordingObserver {
    results: Mutex<Vec<(EventKind, bool)>>,
}

impl RecordingObserver {
    /// `(kind, succeeded)` for every delivery observed so far.
    pub fn results(&self) -> Vec<(EventKind, bool)> {
        self.results.lock().unwrap().clone()
    }
}

impl DeliveryObserver for RecordingObserver {
    fn on_delivery(&self, kind: EventKind, result: &Result<(), DeliveryError>) {
        self.results.lock().unwrap().push((kind, result.is_ok()));
    }
}
