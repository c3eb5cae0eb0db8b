//! Persistent Store Module
//!
//! Asynchronous key-value stores the cache persists its records into.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::StoreResult;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Key-Value Store ==
/// A string-to-string persistent store shared by every cache built on it.
///
/// Implementations serialize writes per key; the cache relies on that for
/// last-writer-wins and adds no locking of its own.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the value under `key`, `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Lists every key in the store, in no particular order.
    async fn all_keys(&self) -> StoreResult<Vec<String>>;
}
