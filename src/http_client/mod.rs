//! This module provides the HTTP client and TLS settings used for webhook
//! deliveries.

mod client;

pub use client::{HttpClientError, create_http_client, create_tls_config};
