//! API Handlers
//!
//! HTTP request handlers for each movie cache endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use super::extractors::{CacheJson, CachePath};

use crate::cache::{Clock, SweepReport, SystemClock, TimeBoxedCache};
use crate::error::Result;
use crate::models::{ApiResponse, EntryInfo, HealthResponse, MovieDetails, StoredResponse};
use crate::store::KvStore;

/// Cache of movie detail records.
pub type MovieCache = TimeBoxedCache<MovieDetails>;

/// Application state shared across all handlers.
///
/// The cache holds its store and clock behind `Arc`s, so cloning the state
/// is cheap and every clone sees the same store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cache: MovieCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: MovieCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState over `store` using the system clock.
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self::new(TimeBoxedCache::new(store, clock))
    }
}

/// Handler for GET /movies/:id
///
/// Returns the cached movie. Stale entries are still served.
pub async fn get_movie_handler(
    State(state): State<AppState>,
    CachePath(id): CachePath<u64>,
) -> Result<Json<ApiResponse<MovieDetails>>> {
    let movie = state.cache.get(id).await?;
    Ok(Json(ApiResponse::ok(movie)))
}

/// Handler for PUT /movies
///
/// Caches the movie under the key derived from its id.
pub async fn put_movie_handler(
    State(state): State<AppState>,
    CacheJson(movie): CacheJson<MovieDetails>,
) -> Result<Json<ApiResponse<StoredResponse>>> {
    state.cache.put(&movie).await?;
    let key = state.cache.key_for(movie.id);
    Ok(Json(ApiResponse::ok(StoredResponse { key })))
}

/// Handler for GET /movies/:id/entry
///
/// Returns the entry's storage metadata and whether it has expired.
pub async fn entry_handler(
    State(state): State<AppState>,
    CachePath(id): CachePath<u64>,
) -> Result<Json<ApiResponse<EntryInfo>>> {
    let entry = state.cache.entry(id).await?;
    let info = EntryInfo::new(&entry, state.cache.now_ms(), state.cache.ttl_ms());
    Ok(Json(ApiResponse::ok(info)))
}

/// Handler for POST /sweep
///
/// Runs a sweep immediately and reports what it did.
pub async fn sweep_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SweepReport>>> {
    let report = state.cache.sweep().await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
