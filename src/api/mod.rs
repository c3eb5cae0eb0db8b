//! API Module
//!
//! HTTP handlers and routing for the movie cache REST API.
//!
//! # Endpoints
//! - `GET /movies/:id` - Read a cached movie
//! - `PUT /movies` - Cache a movie
//! - `GET /movies/:id/entry` - Entry metadata and expiry
//! - `POST /sweep` - Remove expired entries
//! - `GET /health` - Health check endpoint

pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::{CacheJson, CachePath};
pub use handlers::*;
pub use routes::create_router;
