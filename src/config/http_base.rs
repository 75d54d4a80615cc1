use std::time::Duration;

use serde::Deserialize;

use super::deserialize_duration_from_seconds;

fn default_idle_per_host() -> usize {
    10
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Settings for the `reqwest` client behind the `http_client` transport.
///
/// The buffered-stream transport opens a fresh connection per delivery and
/// only honours `connect_timeout` and `user_agent`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BaseHttpClientConfig {
    /// Maximum idle connections per host
    #[serde(default = "default_idle_per_host")]
    pub max_idle_per_host: usize,

    /// Timeout for idle connections
    #[serde(default = "default_idle_timeout", deserialize_with = "deserialize_duration_from_seconds")]
    pub idle_timeout: Duration,

    /// Timeout for establishing connections
    #[serde(
        default = "default_connect_timeout",
        deserialize_with = "deserialize_duration_from_seconds"
    )]
    pub connect_timeout: Duration,

    /// Value of the `User-Agent` header sent with every delivery
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BaseHttpClientConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: default_idle_per_host(),
            idle_timeout: default_idle_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
