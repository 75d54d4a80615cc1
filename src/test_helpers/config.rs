use url::Url;

use crate::config::{AppConfig, WikiConfig};

/// Creates a configuration posting to `webhook_url` in room `wiki`, with
/// links pointing at `https://wiki.example.com/`.
pub fn create_test_config(webhook_url: &str) -> AppConfig {
    AppConfig {
        webhook_url: Some(Url::parse(webhook_url).unwrap()),
        room_name: "wiki".to_string(),
        wiki: WikiConfig {
            base_url: "https://wiki.example.com/".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}
