//! Cache Entry Module
//!
//! Defines a stored cache entry and its on-disk record format: a flat JSON
//! object holding every payload field plus a `cached_at` timestamp.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CacheError, Result};

/// Name of the metadata field injected into every stored record.
pub const CACHED_AT_FIELD: &str = "cached_at";

// == Record Format ==
#[derive(Deserialize)]
struct Record {
    cached_at: i64,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

#[derive(Serialize)]
struct RecordRef<'a> {
    #[serde(flatten)]
    payload: &'a Map<String, Value>,
    cached_at: i64,
}

// == Cache Entry ==
/// A single cached object together with its storage metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Namespaced store key
    pub key: String,
    /// Payload fields, without `cached_at`
    pub payload: Map<String, Value>,
    /// Write timestamp (Unix milliseconds)
    pub cached_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Builds an entry from a domain object, stamping it with `cached_at`.
    ///
    /// A `cached_at` field already present on the payload is discarded. The
    /// payload must serialize to a JSON object.
    pub fn from_payload<T: Serialize>(
        key: impl Into<String>,
        payload: &T,
        cached_at: i64,
    ) -> Result<Self> {
        let key = key.into();
        match serde_json::to_value(payload)? {
            Value::Object(mut fields) => {
                fields.remove(CACHED_AT_FIELD);
                Ok(Self {
                    key,
                    payload: fields,
                    cached_at,
                })
            }
            other => Err(CacheError::InvalidPayload(format!(
                "{} must serialize to an object, got {}",
                key,
                json_kind(&other)
            ))),
        }
    }

    // == Codec ==
    /// Parses a stored record read from `key`.
    pub fn decode(key: impl Into<String>, raw: &str) -> Result<Self> {
        let key = key.into();
        match serde_json::from_str::<Record>(raw) {
            Ok(record) => Ok(Self {
                key,
                payload: record.payload,
                cached_at: record.cached_at,
            }),
            Err(source) => Err(CacheError::Corrupt { key, source }),
        }
    }

    /// Serializes the entry into its stored record form.
    pub fn encode(&self) -> Result<String> {
        let record = RecordRef {
            payload: &self.payload,
            cached_at: self.cached_at,
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Converts the payload fields back into the domain object.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T> {
        let key = self.key;
        serde_json::from_value(Value::Object(self.payload))
            .map_err(|source| CacheError::Corrupt { key, source })
    }

    // == Expiry ==
    /// Milliseconds elapsed between the write and `now_ms`.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.cached_at)
    }

    /// An entry is expired once its age strictly exceeds `ttl_ms`.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u64,
        title: String,
    }

    fn sample() -> Sample {
        Sample {
            id: 7,
            title: "Se7en".to_string(),
        }
    }

    #[test]
    fn test_encode_is_flat_record() {
        let entry = CacheEntry::from_payload("movie_7", &sample(), 1_000).unwrap();
        let raw = entry.encode().unwrap();

        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"id": 7, "title": "Se7en", "cached_at": 1_000}));
    }

    #[test]
    fn test_decode_strips_metadata() {
        let raw = r#"{"id":7,"title":"Se7en","cached_at":42}"#;
        let entry = CacheEntry::decode("movie_7", raw).unwrap();

        assert_eq!(entry.cached_at, 42);
        assert!(!entry.payload.contains_key(CACHED_AT_FIELD));
        assert_eq!(entry.into_payload::<Sample>().unwrap(), sample());
    }

    #[test]
    fn test_payload_cached_at_is_replaced() {
        let payload = json!({"id": 1, "cached_at": 5});
        let entry = CacheEntry::from_payload("movie_1", &payload, 99).unwrap();

        assert_eq!(entry.cached_at, 99);
        let value: Value = serde_json::from_str(&entry.encode().unwrap()).unwrap();
        assert_eq!(value, json!({"id": 1, "cached_at": 99}));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let result = CacheEntry::from_payload("movie_1", &vec![1, 2, 3], 0);
        assert!(matches!(result, Err(CacheError::InvalidPayload(_))));
    }

    #[test]
    fn test_decode_corrupt() {
        for raw in ["not json", r#"{"id":1}"#, r#"{"id":1,"cached_at":"yesterday"}"#, "[]"] {
            let result = CacheEntry::decode("movie_1", raw);
            assert!(
                matches!(result, Err(CacheError::Corrupt { .. })),
                "{:?} should be corrupt",
                raw
            );
        }
    }

    #[test]
    fn test_into_payload_shape_mismatch() {
        let entry = CacheEntry::decode("movie_1", r#"{"id":"one","cached_at":0}"#).unwrap();
        let result = entry.into_payload::<Sample>();
        assert!(matches!(result, Err(CacheError::Corrupt { .. })));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::from_payload("movie_7", &sample(), 1_000).unwrap();

        assert!(!entry.is_expired(1_100, 100), "Age equal to TTL is still fresh");
        assert!(entry.is_expired(1_101, 100));
        assert_eq!(entry.age_ms(1_101), 101);
    }
}
