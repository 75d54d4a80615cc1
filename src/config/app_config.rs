use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::{
    BaseHttpClientConfig, NotificationToggles, PayloadEncoding, TransportKind, WikiConfig,
    deserialize_duration_from_seconds, deserialize_optional_url,
};

/// Provides the default value for delivery_timeout_secs.
fn default_delivery_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Errors found when checking a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// The webhook URL does not use `http` or `https`.
    #[error("Unsupported webhook URL scheme '{0}': expected http or https")]
    UnsupportedWebhookScheme(String),

    /// A zero delivery timeout would abort every delivery.
    #[error("delivery_timeout_secs must be greater than zero")]
    ZeroDeliveryTimeout,
}

/// Application configuration for the wiki-to-Hubot bridge.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The Hubot incoming-webhook URL. Unset means notifications are dropped
    /// with a warning.
    #[serde(default, deserialize_with = "deserialize_optional_url")]
    pub webhook_url: Option<Url>,

    /// Room (channel) the bot should post notifications to.
    #[serde(default)]
    pub room_name: String,

    /// Mechanism used for the outbound POST.
    #[serde(default)]
    pub transport: TransportKind,

    /// Wire format of the posted body.
    #[serde(default)]
    pub payload_encoding: PayloadEncoding,

    /// Upper bound for a single delivery attempt.
    #[serde(
        rename = "delivery_timeout_secs",
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_delivery_timeout"
    )]
    pub delivery_timeout: Duration,

    /// Wiki location used for links inside messages.
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Which event kinds are announced.
    #[serde(default)]
    pub notifications: NotificationToggles,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http: BaseHttpClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            room_name: String::new(),
            transport: TransportKind::default(),
            payload_encoding: PayloadEncoding::default(),
            delivery_timeout: default_delivery_timeout(),
            wiki: WikiConfig::default(),
            notifications: NotificationToggles::default(),
            http: BaseHttpClientConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading `app.yaml` from the configuration
    /// directory (default `configs`) and applying `WIKI_HUBOT__*` environment
    /// overrides on top.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("WIKI_HUBOT").separator("__").try_parsing(true))
            .build()?;
        s.try_deserialize()
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(url) = &self.webhook_url {
            match url.scheme() {
                "http" | "https" => {}
                other =>
                    return Err(ConfigValidationError::UnsupportedWebhookScheme(other.to_string())),
            }
        }
        if self.delivery_timeout.is_zero() {
            return Err(ConfigValidationError::ZeroDeliveryTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, io::Write};

    use tempfile::TempDir;

    use super::*;
    use crate::models::EventKind;

    fn write_app_yaml(dir: &TempDir, content: &str) {
        let path = dir.path().join("app.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", content).unwrap();
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let content = r#"
webhook_url: "http://hubot.example.com:8080/incoming"
room_name: "wiki"
transport: "buffered_stream"
payload_encoding: "json"
delivery_timeout_secs: 3
wiki:
  base_url: "https://wiki.example.com/"
  script_path: "wiki/"
notifications:
  moved: false
  user_blocked: false
http:
  connect_timeout: 2
"#;
        write_app_yaml(&dir, content);

        let config = AppConfig::new(dir.path().to_str()).unwrap();

        assert_eq!(
            config.webhook_url,
            Some(Url::parse("http://hubot.example.com:8080/incoming").unwrap())
        );
        assert_eq!(config.room_name, "wiki");
        assert_eq!(config.transport, TransportKind::BufferedStream);
        assert_eq!(config.payload_encoding, PayloadEncoding::Json);
        assert_eq!(config.delivery_timeout, Duration::from_secs(3));
        assert_eq!(config.wiki.base_url, "https://wiki.example.com/");
        assert_eq!(config.wiki.script_path, "wiki/");
        assert_eq!(config.wiki.block_list_page, "Special:BlockList");
        assert!(!config.notifications.is_enabled(EventKind::PageMoved));
        assert!(!config.notifications.is_enabled(EventKind::UserBlocked));
        assert!(config.notifications.is_enabled(EventKind::PageEdited));
        assert_eq!(config.http.connect_timeout, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        write_app_yaml(&dir, r#"webhook_url: """#);

        let config = AppConfig::new(dir.path().to_str()).unwrap();

        assert!(config.webhook_url.is_none());
        assert_eq!(config.room_name, "");
        assert_eq!(config.transport, TransportKind::HttpClient);
        assert_eq!(config.payload_encoding, PayloadEncoding::Legacy);
        assert_eq!(config.delivery_timeout, Duration::from_secs(5));
        assert_eq!(config.wiki.script_path, "index.php?title=");
        assert_eq!(config.notifications, NotificationToggles::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::new(dir.path().join("nope").to_str());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_transport() {
        let dir = TempDir::new().unwrap();
        write_app_yaml(&dir, r#"transport: "file_get_contents""#);
        let result = AppConfig::new(dir.path().to_str());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_unsupported_scheme() {
        let config = AppConfig {
            webhook_url: Some(Url::parse("ftp://hubot.example.com/").unwrap()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedWebhookScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_validate_accepts_https_for_both_transports() {
        for transport in [TransportKind::HttpClient, TransportKind::BufferedStream] {
            let config = AppConfig {
                webhook_url: Some(Url::parse("https://hubot.example.com/").unwrap()),
                transport,
                ..Default::default()
            };
            assert_eq!(config.validate(), Ok(()), "{transport:?}");
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = AppConfig { delivery_timeout: Duration::ZERO, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroDeliveryTimeout));
    }
}
