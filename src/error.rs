//! Error types for the movie cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a persistent key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying I/O fault
    #[error("Store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be represented by this store
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    /// Store is not reachable or refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent from the store
    #[error("Key not found: {key}")]
    NotFound { key: String },

    /// Stored record could not be decoded
    #[error("Corrupt record at {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload cannot be stored as a record
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Malformed request path or body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payload failed to serialize
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistent store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CacheError {
    /// Machine-readable error code carried in structured responses.
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::NotFound { .. } => "404",
            CacheError::Corrupt { .. } => "422",
            CacheError::InvalidPayload(_) | CacheError::InvalidRequest(_) => "400",
            CacheError::Serialization(_) => "500",
            CacheError::Store(StoreError::InvalidKey(_)) => "400",
            CacheError::Store(_) => "503",
        }
    }

    /// True when the error only signals an absent key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }

    fn status(&self) -> StatusCode {
        match self {
            CacheError::NotFound { .. } => StatusCode::NOT_FOUND,
            CacheError::Corrupt { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::InvalidPayload(_) | CacheError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Store(StoreError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            CacheError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string(), self.code()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_code() {
        let err = CacheError::NotFound {
            key: "movie_7".to_string(),
        };
        assert_eq!(err.code(), "404");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Key not found: movie_7");
    }

    #[test]
    fn test_store_error_wraps_transparently() {
        let err: CacheError = StoreError::Unavailable("offline".to_string()).into();
        assert_eq!(err.code(), "503");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Store unavailable: offline");
    }

    #[test]
    fn test_invalid_key_is_caller_error() {
        let err: CacheError = StoreError::InvalidKey("movie_a/b".to_string()).into();
        assert_eq!(err.code(), "400");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_request_code() {
        let err = CacheError::InvalidRequest("bad path".to_string());
        assert_eq!(err.code(), "400");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_corrupt_status() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CacheError::Corrupt {
            key: "movie_1".to_string(),
            source,
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "422");
    }
}
