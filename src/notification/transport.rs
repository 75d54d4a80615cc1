//! Delivery transports.
//!
//! Both strategies POST the encoded payload with `Content-Type:
//! application/json`, make a single attempt, and ignore the response status.
//! Only transport-level failures (refused connections, DNS errors, TLS
//! handshakes, timeouts) are reported.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream},
    net::TcpStream,
};
use tokio_rustls::{
    TlsConnector,
    rustls::{ClientConfig, pki_types::ServerName},
};
use url::{Host, Url};

use super::error::DeliveryError;
use crate::{
    config::{AppConfig, TransportKind},
    http_client::{HttpClientError, create_http_client, create_tls_config},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Performs the outbound POST of an encoded payload.
#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    /// Posts `payload` to `endpoint`.
    ///
    /// Returns `Ok(())` once the endpoint has answered, whatever the status.
    async fn deliver(&self, endpoint: &Url, payload: &str) -> Result<(), DeliveryError>;
}

/// Builds the transport selected in the configuration.
pub fn build_transport(config: &AppConfig) -> Result<Arc<dyn DeliveryTransport>, HttpClientError> {
    let transport: Arc<dyn DeliveryTransport> = match config.transport {
        TransportKind::HttpClient => {
            let client = create_http_client(&config.http)?;
            Arc::new(HttpClientTransport::new(client, config.delivery_timeout))
        }
        TransportKind::BufferedStream => Arc::new(BufferedStreamTransport::new(
            config.http.connect_timeout,
            config.delivery_timeout,
            config.http.user_agent.clone(),
            create_tls_config()?,
        )),
    };
    Ok(transport)
}

/// Delivers through a shared `reqwest` client.
pub struct HttpClientTransport {
    client: Client,
    timeout: Duration,
}

impl HttpClientTransport {
    /// Creates a transport that bounds each attempt by `timeout`.
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl DeliveryTransport for HttpClientTransport {
    async fn deliver(&self, endpoint: &Url, payload: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload.to_owned())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { DeliveryError::Timeout(self.timeout) } else { e.into() })?;

        let status = response.status();
        // The body is irrelevant, but reading it lets the connection return to the pool.
        if let Err(e) = response.bytes().await {
            tracing::debug!(error = %e, "Failed to read webhook response body.");
        }
        tracing::debug!(endpoint = %endpoint, status = %status, "Webhook answered.");

        Ok(())
    }
}

/// Delivers by writing an HTTP/1.1 request over a fresh TCP connection,
/// wrapped in TLS for `https://` endpoints.
///
/// Every attempt opens its own connection and asks the peer to close it.
pub struct BufferedStreamTransport {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
    tls: TlsConnector,
}

impl BufferedStreamTransport {
    /// Creates a transport with separate bounds for connecting and for the
    /// whole attempt. `tls` decides which servers are trusted on `https://`
    /// endpoints.
    pub fn new(
        connect_timeout: Duration,
        timeout: Duration,
        user_agent: String,
        tls: Arc<ClientConfig>,
    ) -> Self {
        Self { connect_timeout, timeout, user_agent, tls: TlsConnector::from(tls) }
    }

    async fn connect(&self, endpoint: &Url) -> Result<TcpStream, DeliveryError> {
        let host = host_name(endpoint)?;
        let port = endpoint
            .port_or_known_default()
            .ok_or_else(|| DeliveryError::InvalidEndpoint(format!("{endpoint} has no port")))?;

        tokio::time::timeout(self.connect_timeout, TcpStream::connect((host.as_str(), port)))
            .await
            .map_err(|_| DeliveryError::Timeout(self.connect_timeout))?
            .map_err(DeliveryError::from)
    }

    async fn attempt(&self, endpoint: &Url, payload: &str) -> Result<u16, DeliveryError> {
        match endpoint.scheme() {
            "http" => {
                let stream = self.connect(endpoint).await?;
                post_over_stream(stream, endpoint, payload, &self.user_agent).await
            }
            "https" => {
                let host = host_name(endpoint)?;
                let server_name = ServerName::try_from(host.as_str())
                    .map_err(|e| DeliveryError::InvalidEndpoint(e.to_string()))?
                    .to_owned();
                let stream = self.connect(endpoint).await?;
                let stream = self.tls.connect(server_name, stream).await?;
                post_over_stream(stream, endpoint, payload, &self.user_agent).await
            }
            other => Err(DeliveryError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[async_trait]
impl DeliveryTransport for BufferedStreamTransport {
    async fn deliver(&self, endpoint: &Url, payload: &str) -> Result<(), DeliveryError> {
        let status = tokio::time::timeout(self.timeout, self.attempt(endpoint, payload))
            .await
            .map_err(|_| DeliveryError::Timeout(self.timeout))??;

        tracing::debug!(endpoint = %endpoint, status, "Webhook answered.");
        Ok(())
    }
}

/// Host of `endpoint` as used for name resolution and TLS, without the
/// brackets around IPv6 literals.
fn host_name(endpoint: &Url) -> Result<String, DeliveryError> {
    match endpoint.host() {
        Some(Host::Domain(domain)) => Ok(domain.to_string()),
        Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
        None => Err(DeliveryError::InvalidEndpoint(format!("{endpoint} has no host"))),
    }
}

/// Writes a POST request for `endpoint` to `stream` and reads the response
/// head. Returns the response status code.
///
/// Header bytes are not required to be UTF-8. Once the status line is read
/// the delivery counts as answered, so failures while draining the body are
/// only logged.
pub(crate) async fn post_over_stream<S>(
    stream: S,
    endpoint: &Url,
    payload: &str,
    user_agent: &str,
) -> Result<u16, DeliveryError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut stream = BufStream::new(stream);

    stream.write_all(request_head(endpoint, payload.len(), user_agent)?.as_bytes()).await?;
    stream.write_all(payload.as_bytes()).await?;
    stream.flush().await?;

    let mut line = Vec::new();
    if stream.read_until(b'\n', &mut line).await? == 0 {
        return Err(DeliveryError::MalformedResponse(
            "connection closed before a response was received".to_string(),
        ));
    }
    let status = parse_status_line(&String::from_utf8_lossy(&line))?;

    let mut content_length = None;
    loop {
        line.clear();
        if stream.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let header = String::from_utf8_lossy(&line);
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<u64>().ok();
            }
        }
    }

    // Without a length the peer closes the connection when done.
    let mut sink = tokio::io::sink();
    let drained = match content_length {
        Some(len) => tokio::io::copy(&mut (&mut stream).take(len), &mut sink).await,
        None => tokio::io::copy(&mut stream, &mut sink).await,
    };
    if let Err(e) = drained {
        tracing::debug!(error = %e, "Failed to read webhook response body.");
    }

    Ok(status)
}

fn request_head(endpoint: &Url, content_length: usize, user_agent: &str) -> Result<String, DeliveryError> {
    // IPv6 literals keep their brackets in the Host header.
    let host = endpoint
        .host_str()
        .ok_or_else(|| DeliveryError::InvalidEndpoint(format!("{endpoint} has no host")))?;
    let host = match endpoint.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let target = match endpoint.query() {
        Some(query) => format!("{}?{}", endpoint.path(), query),
        None => endpoint.path().to_string(),
    };

    Ok(format!(
        "POST {target} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Content-Type: {JSON_CONTENT_TYPE}\r\n\
         Content-Length: {content_length}\r\n\
         User-Agent: {user_agent}\r\n\
         Connection: close\r\n\
         \r\n"
    ))
}

fn parse_status_line(line: &str) -> Result<u16, DeliveryError> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(version), Some(code)) if version.starts_with("HTTP/") => code
            .parse::<u16>()
            .map_err(|_| DeliveryError::MalformedResponse(format!("invalid status line: {}", line.trim_end()))),
        _ => Err(DeliveryError::MalformedResponse(format!(
            "invalid status line: {}",
            line.trim_end()
        ))),
    }
}
