//! Namespaced cache keys.

use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};

// == Cacheable ==
/// A domain object the cache can store.
///
/// The object carries its own identifier; the key is `KEY_PREFIX` followed by
/// the identifier's `Display` form.
pub trait Cacheable: Serialize + DeserializeOwned + Send + Sync {
    /// Identifier type, e.g. a numeric movie id.
    type Id: Display;

    /// Namespace prefix separating this cache's keys from unrelated keys in
    /// the same store.
    const KEY_PREFIX: &'static str;

    /// Identifier of this object.
    fn cache_id(&self) -> Self::Id;
}

/// Builds the store key for `id` under `prefix`.
pub fn namespaced_key(prefix: &str, id: impl Display) -> String {
    format!("{}{}", prefix, id)
}
