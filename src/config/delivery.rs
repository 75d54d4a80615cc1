use serde::Deserialize;

/// Which mechanism performs the outbound POST.
#[derive(Default, Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// A pooled `reqwest` client.
    #[default]
    HttpClient,
    /// A hand-written HTTP/1.1 request over a buffered byte stream, one
    /// connection per delivery. `https://` endpoints are wrapped in TLS.
    BufferedStream,
}

/// How the payload is serialized onto the wire.
#[derive(Default, Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// The historical format: `{"message": "...", "room": "..."}` with double
    /// quotes in the message replaced by single quotes and nothing else
    /// escaped. Byte-for-byte compatible with already deployed bots.
    #[default]
    Legacy,
    /// Compact JSON produced by `serde_json` with full string escaping.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(TransportKind::default(), TransportKind::HttpClient);
        assert_eq!(PayloadEncoding::default(), PayloadEncoding::Legacy);
    }

    #[test]
    fn test_deserialize_snake_case() {
        let kind: TransportKind = serde_json::from_str(r#""buffered_stream""#).unwrap();
        assert_eq!(kind, TransportKind::BufferedStream);
        let encoding: PayloadEncoding = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(encoding, PayloadEncoding::Json);
        assert!(serde_json::from_str::<TransportKind>(r#""curl""#).is_err());
    }
}
