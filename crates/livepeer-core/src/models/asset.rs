use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Asset metadata as returned by GET /api/asset/{id}.
///
/// The document is passed through untouched; the accessors only read well-known
/// fields and never fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRecord(pub Value);

impl AssetRecord {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// `status.phase`, e.g. "waiting", "processing", "ready", "failed"
    pub fn status_phase(&self) -> Option<&str> {
        self.0
            .get("status")
            .and_then(|status| status.get("phase"))
            .and_then(Value::as_str)
    }

    pub fn playback_url(&self) -> Option<&str> {
        self.0.get("playbackUrl").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let record = AssetRecord(json!({
            "id": "asset-1",
            "status": { "phase": "ready", "updatedAt": 1700000000 },
            "playbackUrl": "https://cdn.example/hls/abc/index.m3u8"
        }));
        assert_eq!(record.id(), Some("asset-1"));
        assert_eq!(record.status_phase(), Some("ready"));
        assert_eq!(
            record.playback_url(),
            Some("https://cdn.example/hls/abc/index.m3u8")
        );
    }

    #[test]
    fn test_accessors_tolerate_missing_or_null_fields() {
        let record = AssetRecord(json!({ "id": 42, "playbackUrl": null }));
        assert_eq!(record.id(), None);
        assert_eq!(record.status_phase(), None);
        assert_eq!(record.playback_url(), None);
    }

    #[test]
    fn test_serializes_transparently() {
        let value = json!({ "id": "a", "custom": { "nested": [1, 2, 3] } });
        let record: AssetRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }
}
