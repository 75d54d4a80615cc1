use serde::{Deserialize, Deserializer, de};
use std::time::Duration;
use url::Url;

/// Custom deserializer for Duration from seconds
pub fn deserialize_duration_from_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

/// Custom deserializer for an optional URL.
///
/// Deployments ship with an empty webhook URL until an operator fills it in,
/// so an empty (or whitespace-only) string maps to `None` instead of failing.
pub fn deserialize_optional_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url_str) => Url::parse(url_str).map(Some).map_err(de::Error::custom),
    }
}
