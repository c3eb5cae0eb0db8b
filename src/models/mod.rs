//! Domain records and response models for the movie cache API

pub mod movie;
pub mod responses;

// Re-export commonly used types
pub use movie::{Genre, MovieDetails, MOVIE_KEY_PREFIX};
pub use responses::{ApiResponse, EntryInfo, ErrorResponse, HealthResponse, StoredResponse};
