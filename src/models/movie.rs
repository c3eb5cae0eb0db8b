//! Movie detail record cached by the service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cache::Cacheable;

/// Namespace prefix of movie keys in the store.
pub const MOVIE_KEY_PREFIX: &str = "movie_";

/// A genre tag attached to a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Movie details as returned by the metadata API.
///
/// Only `id` and `title` are typed. Every other field is kept verbatim in
/// `fields`, so explicit nulls, empty lists and number formatting come back
/// exactly as they were stored. The accessors below read the common fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MovieDetails {
    /// Creates a record with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            fields: Map::new(),
        }
    }

    /// Sets an untyped field. `id` and `title` are struct fields and are
    /// ignored here.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if name != "id" && name != "title" {
            self.fields.insert(name, value);
        }
        self
    }

    /// Raw value of an untyped field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn overview(&self) -> Option<&str> {
        self.str_field("overview")
    }

    pub fn release_date(&self) -> Option<&str> {
        self.str_field("release_date")
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.str_field("poster_path")
    }

    /// Runtime in minutes.
    pub fn runtime(&self) -> Option<u64> {
        self.field("runtime").and_then(Value::as_u64)
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.field("vote_average").and_then(Value::as_f64)
    }

    /// Genres, or an empty list when absent or malformed.
    pub fn genres(&self) -> Vec<Genre> {
        self.field("genres")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

impl Cacheable for MovieDetails {
    type Id = u64;
    const KEY_PREFIX: &'static str = MOVIE_KEY_PREFIX;

    fn cache_id(&self) -> u64 {
        self.id
    }
}
