//! API Routes
//!
//! Configures the Axum router with all movie cache endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    entry_handler, get_movie_handler, health_handler, put_movie_handler, sweep_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /movies/:id` - Read a cached movie
/// - `PUT /movies` - Cache a movie
/// - `GET /movies/:id/entry` - Entry metadata and expiry
/// - `POST /sweep` - Remove expired entries now
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/movies", put(put_movie_handler))
        .route("/movies/:id", get(get_movie_handler))
        .route("/movies/:id/entry", get(entry_handler))
        .route("/sweep", post(sweep_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
