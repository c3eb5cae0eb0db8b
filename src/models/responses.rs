//! Response DTOs for the movie cache API
//!
//! Every body carries an `ok` flag so callers branch on it instead of on the
//! HTTP status alone.

use serde::Serialize;

use crate::cache::CacheEntry;

/// Successful response envelope: `{"ok": true, "data": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` in a successful envelope
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Error response body: `{"ok": false, "error": ..., "code": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    /// Error message describing what went wrong
    pub error: String,
    /// Machine-readable error code, e.g. "404"
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Data returned after a successful PUT /movies
#[derive(Debug, Clone, Serialize)]
pub struct StoredResponse {
    /// The store key written
    pub key: String,
}

/// Entry metadata for GET /movies/:id/entry
#[derive(Debug, Clone, Serialize)]
pub struct EntryInfo {
    pub key: String,
    /// Write timestamp in Unix milliseconds
    pub cached_at: i64,
    /// Age at the time of the request
    pub age_ms: i64,
    /// Whether a sweep would remove the entry now
    pub expired: bool,
}

impl EntryInfo {
    pub fn new(entry: &CacheEntry, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            key: entry.key.clone(),
            cached_at: entry.cached_at,
            age_ms: entry.age_ms(now_ms),
            expired: entry.is_expired(now_ms, ttl_ms),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
