//! Construction of the `reqwest` client used by the `http_client` transport,
//! and of the TLS settings used by the `buffered_stream` transport.

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tokio_rustls::rustls::{self, ClientConfig, RootCertStore, crypto::ring};

use crate::config::BaseHttpClientConfig;

/// Errors that can occur while building the HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// An error occurred while building the underlying `reqwest::Client`.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientBuildError(#[from] reqwest::Error),

    /// The TLS client configuration could not be built.
    #[error("Failed to build TLS configuration: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Creates the HTTP client shared by every delivery of a process.
///
/// Redirects are not followed: the incoming-webhook endpoint answers the POST
/// directly and a redirect would silently turn it into a GET.
pub fn create_http_client(config: &BaseHttpClientConfig) -> Result<Client, HttpClientError> {
    let client = Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(Some(config.idle_timeout))
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(client)
}

/// Creates the TLS client configuration for `https://` endpoints, trusting
/// the Mozilla root certificates bundled through `webpki-roots`.
pub fn create_tls_config() -> Result<Arc<ClientConfig>, HttpClientError> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_client_with_defaults() {
        let client = create_http_client(&BaseHttpClientConfig::default());
        assert!(client.is_ok(), "Should build a client from the default configuration");
    }

    #[test]
    fn test_create_tls_config() {
        let config = create_tls_config();
        assert!(config.is_ok(), "Should build a TLS configuration from the bundled roots");
    }

    #[tokio::test]
    async fn test_client_sends_configured_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "wiki-hubot-test")
            .with_status(200)
            .create_async()
            .await;

        let config =
            BaseHttpClientConfig { user_agent: "wiki-hubot-test".to_string(), ..Default::default() };
        let client = create_http_client(&config).unwrap();
        client.get(server.url()).send().await.unwrap();

        mock.assert_async().await;
    }
}
