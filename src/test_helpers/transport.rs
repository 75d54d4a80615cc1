use std::{io, sync::Mutex};

use async_trait::async_trait;
use url::Url;

use crate::notification::{DeliveryTransport, error::DeliveryError};

/// A transport double that records every delivery instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<(Url, String)>>,
    fail: bool,
}

impl RecordingTransport {
    /// A transport that records deliveries and then fails them as if the
    /// endpoint refused the connection.
    pub fn failing() -> Self {
        Self { calls: Mutex::new(Vec::new()), fail: true }
    }

    /// The `(endpoint, payload)` pairs delivered so far.
    pub fn calls(&self) -> Vec<(Url, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of deliveries attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DeliveryTransport for RecordingTransport {
    async fn deliver(&self, endpoint: &Url, payload: &str) -> Result<(), DeliveryError> {
        self.calls.lock().unwrap().push((endpoint.clone(), payload.to_string()));
        if self.fail {
            return Err(DeliveryError::Io(io::Error::from(io::ErrorKind::ConnectionRefused)));
        }
        Ok(())
    }
}
